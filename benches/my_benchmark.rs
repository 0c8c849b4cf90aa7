use criterion::{black_box, criterion_group, criterion_main, Criterion};
use itertools::Itertools;

use prop_nexus::core::cnf::Cnf;
use prop_nexus::core::handler::NopHandler;
use prop_nexus::core::solver::Dpll;
use prop_nexus::{Engine, Form};

// (x1 & y1) | (x2 & y2) | ... : 2^n clauses in CNF.
fn disjunction_of_pairs(n: usize) -> String {
    (0..n)
        .map(|i| {
            let x = (b'a' + 2 * i as u8) as char;
            let y = (b'a' + 2 * i as u8 + 1) as char;
            format!("({} & {})", x, y)
        })
        .join(" | ")
}

// Pigeon i in hole j is variable i * holes + j + 1.
fn pigeonhole(pigeons: i32, holes: i32) -> Cnf {
    let var = |i: i32, j: i32| i * holes + j + 1;
    let mut clauses: Vec<Vec<i32>> = (0..pigeons).map(|i| (0..holes).map(|j| var(i, j)).collect()).collect();
    for j in 0..holes {
        for (a, b) in (0..pigeons).tuple_combinations() {
            clauses.push(vec![-var(a, j), -var(b, j)]);
        }
    }
    Cnf::from(clauses)
}

fn my_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Normalization");
    let engine = Engine::default();
    for n in [4, 6, 7] {
        let input = disjunction_of_pairs(n);
        group.bench_with_input(format!("CNF of {} pairs", n), &input, |b, input| {
            b.iter(|| engine.normalize(black_box(input.as_str()), Form::Cnf))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("DPLL");
    for pigeons in [4, 5] {
        let cnf = pigeonhole(pigeons, pigeons - 1);
        group.bench_with_input(format!("pigeonhole {}-{}", pigeons, pigeons - 1), &cnf, |b, cnf| {
            b.iter(|| Dpll::new(cnf, &mut NopHandler).solve())
        });
    }
    group.finish();

    let mut group = c.benchmark_group("Equivalence");
    group.bench_function("distributivity", |b| {
        b.iter(|| engine.are_equivalent(black_box("p & (q | r | s)"), black_box("(p & q) | (p & r) | (p & s)")))
    });
    group.finish();
}

criterion_group!(benches, my_benches);
criterion_main!(benches);
