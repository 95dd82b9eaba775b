//! This bench parses a large offering listing, spread over many pages and
//! cost centres, as exported at the start of a term.

#![allow(missing_docs)]

use std::fmt::Write;

use criterion::{Criterion, criterion_group, criterion_main};
use sigra::report::{ParseOptions, offering};

const HEADER: &str = "\
Universidade de Brasília
Sistema de Graduação - SIGRA
Listagem de Oferta de Disciplinas
Período : 2016/1
";

const FOOTER: &str = "\
 Observações :
   ** turma com reserva de vagas
   lstofelst
";

/// Generates a listing with one page per cost centre.
fn listing(cost_centres: usize, courses_per_centre: usize) -> String {
    let mut text = String::new();
    for centre in 0..cost_centres {
        text.push_str(HEADER);
        writeln!(text, "D{centre:02}    -  DEPARTAMENTO {centre}").unwrap();
        text.push_str("   Disciplina                                  Créditos\n");
        for course in 0..courses_per_centre {
            let code = 100_000 + centre * 1_000 + course;
            writeln!(text, " {code}      -  DISCIPLINA NUMERO {course}").unwrap();
            text.push_str("   Créditos: 004  -   002   -   000  -   006    Pré-req: CIC-113034  OU\n");
            text.push_str("                                                     CIC-113042  E MAT-113093\n");
            text.push_str("   Turma  Descrição                Vagas Turno    Dia     Horário     Local        Professor\n");
            text.push_str("  A  PARA CALOUROS        40  Diurno   Segunda  08:00 09:50 PJC BT 012  JOAO DA SILVA\n");
            text.push_str("       DE COMPUTAÇÃO             Quarta  08:00 09:50 PJC BT 012  MARIA OLIVEIRA\n");
            text.push_str("  B  TURMA REGULAR        30  Noturno  Terça  19:00 20:40 ICC AT 101  CIC/10  **\n");
        }
        text.push_str(FOOTER);
    }
    text
}

fn parse_offering(c: &mut Criterion) {
    let text = listing(40, 50);
    let options = ParseOptions::default();

    c.bench_function("parse offering", |b| {
        b.iter(|| offering::parse(&text, &options).unwrap());
    });
}

criterion_group!(benches, parse_offering);
criterion_main!(benches);
