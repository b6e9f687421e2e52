/*
Strand synthesis, an assembly engine for paired DNA and RNA strands.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

//! Headless synthesis. Usage: `protein_synthesis [PARAMETERS.json] [NB_CODONS]`
//!
//! A random gene is assembled, transcribed and translated, and the resulting report is printed
//! on the standard output in json format.

use std::env;
use std::path::PathBuf;

#[macro_use]
extern crate serde_derive;
extern crate serde;

/// Headless run of the stages
mod session;
use session::{random_gene, Session};
use synthesis_design::{Parameters, CODON_LENGTH};

const DEFAULT_NB_CODONS: usize = 8;

fn main() {
    pretty_env_logger::init();
    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(PathBuf::from);
    let parameters = if let Some(path) = path.as_ref() {
        match Parameters::from_json(path) {
            Ok(parameters) => parameters,
            Err(e) => {
                log::error!("Could not read parameters from {:?}: {:?}", path, e);
                Parameters::DEFAULT
            }
        }
    } else {
        Parameters::DEFAULT
    };
    log::info!("{}", parameters.formated_string());

    let mut session = Session::new(parameters);
    let max_nb_codons = (session.gene_capacity() / CODON_LENGTH).saturating_sub(2);
    let nb_codons = args
        .get(2)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_NB_CODONS)
        .min(max_nb_codons);

    let gene = random_gene(nb_codons, &mut rand::thread_rng());
    match session.run(&gene) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize report: {}", e),
        },
        Err(e) => {
            log::error!("Synthesis failed during {} stage: {:?}", session.stage(), e);
            std::process::exit(1);
        }
    }
}
