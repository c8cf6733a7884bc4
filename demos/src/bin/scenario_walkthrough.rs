//! Walks a small command program through the engine and prints the
//! rendered event lines, mirroring the two worked scenarios of crossing
//! orders and an amend-driven re-cross.

use limitbook::prelude::*;
use limitbook::parser;
use tracing::info;

const PROGRAM: &str = "\
N,1,1,AB,L,B,104.53,100
N,2,2,AB,L,S,105.53,100
N,3,3,AB,L,B,104.53,90
M,4
N,4,5,AB,L,S,104.43,80
A,2,6,AB,L,S,104.42,100
M,8
Q
";

fn main() {
    tracing_subscriber::fmt::init();
    info!("=== Scenario Walkthrough ===");

    let mut engine = Engine::new(EngineConfig::default());
    let mut sink = LineReportSink::new();

    for (lineno, result) in parser::parse_program(PROGRAM).into_iter().enumerate() {
        match result {
            Ok(command) => match engine.process(command) {
                Ok(events) => sink.report_all(&events),
                Err(err) => {
                    eprintln!("engine terminated at line {lineno}: {err}");
                    break;
                }
            },
            Err(err) => eprintln!("skipping line {lineno}: {err}"),
        }
    }

    for line in sink.lines() {
        println!("{line}");
    }
}
