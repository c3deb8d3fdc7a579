use clap::{Parser, ValueEnum};
use color_eyre::eyre::bail;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use gb_rs::buchberger::{Buchberger, BuchbergerConfig, BuchbergerStats};
use gb_rs::list::ListPoly;
use gb_rs::monomial::Monomial;
use gb_rs::poly::{contains_one, BooleanPolynomial, Reduction};
use gb_rs::types::MAX_VARS;
use gb_rs::zdd::ZddManager;
use gb_rs::zdd_poly::ZddPoly;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Repr {
    List,
    Zdd,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum System {
    /// x1*x2 + x1 = 0, x1*x2 + x2 = 0.
    Two,
    /// Elementary symmetric polynomials of 4 variables equal to 0, and x1*x2*x3*x4 = 1.
    Symmetric4,
    /// All eight minterms of 3 variables equal to 0 (unsatisfiable).
    Minterms3,
    /// Random quadratic equations.
    Random,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum ReductionArg {
    Top,
    Full,
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// System to solve.
    #[arg(value_enum, default_value = "symmetric4")]
    system: System,

    /// Polynomial representation.
    #[clap(long, value_enum, default_value = "zdd")]
    repr: Repr,

    /// Normal-form reduction policy.
    #[clap(long, value_enum, default_value = "top")]
    reduction: ReductionArg,

    /// Number of variables of the random system.
    #[clap(long, value_name = "INT", default_value = "8")]
    vars: u32,

    /// Number of equations of the random system.
    #[clap(long, value_name = "INT", default_value = "10")]
    equations: usize,

    /// Seed of the random system.
    #[clap(long, value_name = "INT", default_value = "42")]
    seed: u64,

    /// Stop after this many critical pairs.
    #[clap(long, value_name = "INT")]
    max_pairs: Option<usize>,

    /// Print the Graphviz rendering of the basis (ZDD only).
    #[clap(long)]
    dot: bool,
}

/// Checks the variable count of the random system.
fn check_vars(n: u32) -> color_eyre::Result<u32> {
    if n == 0 {
        bail!("--vars must be at least 1");
    }
    if n > MAX_VARS {
        bail!("--vars is {}, at most {} variables are supported", n, MAX_VARS);
    }
    Ok(n)
}

fn build_system(args: &Cli) -> color_eyre::Result<(Vec<ListPoly>, u32)> {
    let x = |i: u32| Monomial::var(i);
    let m = |vars: &[u32]| Monomial::from_vars(vars.iter().copied());
    let one = Monomial::one();

    let system = match args.system {
        System::Two => (
            vec![ListPoly::new([m(&[1, 2]), x(1)]), ListPoly::new([m(&[1, 2]), x(2)])],
            2,
        ),
        System::Symmetric4 => (
            vec![
                ListPoly::new([x(1), x(2), x(3), x(4)]),
                ListPoly::new([m(&[1, 2]), m(&[1, 3]), m(&[1, 4]), m(&[2, 3]), m(&[2, 4]), m(&[3, 4])]),
                ListPoly::new([m(&[1, 2, 3]), m(&[1, 2, 4]), m(&[1, 3, 4]), m(&[2, 3, 4])]),
                ListPoly::new([m(&[1, 2, 3, 4]), one]),
            ],
            4,
        ),
        System::Minterms3 => {
            // (x1 + a1)(x2 + a2)(x3 + a3) for every a in {0, 1}^3
            let minterms = (0..8u32)
                .map(|bits| {
                    (1..=3u32).fold(ListPoly::one(), |acc, i| {
                        let factor = if bits & (1 << (i - 1)) != 0 {
                            ListPoly::new([x(i), one])
                        } else {
                            ListPoly::var(i)
                        };
                        &acc * &factor
                    })
                })
                .collect();
            (minterms, 3)
        }
        System::Random => {
            let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
            let n = check_vars(args.vars)?;
            let equations = (0..args.equations)
                .map(|_| {
                    let terms = (0..n + 2).map(|_| {
                        let a = rng.random_range(1..=n);
                        let b = rng.random_range(1..=n);
                        if rng.random_bool(0.3) {
                            one
                        } else {
                            m(&[a, b])
                        }
                    });
                    ListPoly::new(terms.collect::<Vec<_>>())
                })
                .collect();
            (equations, n)
        }
    };
    Ok(system)
}

fn report<P: BooleanPolynomial>(basis: &[P], stats: &BuchbergerStats) {
    println!("Basis ({} polynomials):", basis.len());
    for (i, g) in basis.iter().enumerate() {
        println!("  g{} = {}", i, g);
    }
    println!("stats = {:?}", stats);
    if !stats.complete {
        println!("Pair budget exhausted: the basis may be incomplete");
    } else if contains_one(basis) {
        println!("UNSAT: 1 is in the ideal");
    } else {
        println!("SAT: 1 is not in the ideal");
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let (system, n) = build_system(&args)?;
    println!("System over {} variables:", n);
    for f in &system {
        println!("  {} = 0", f);
    }

    let reduction = match args.reduction {
        ReductionArg::Top => Reduction::Top,
        ReductionArg::Full => Reduction::Full,
    };
    let mut config = BuchbergerConfig::default().with_reduction(reduction);
    if let Some(max_pairs) = args.max_pairs {
        config = config.with_max_pairs(max_pairs);
    }

    let time_total = std::time::Instant::now();
    match args.repr {
        Repr::List => {
            let (basis, stats) = Buchberger::new(config).run(system, n)?;
            report(&basis, &stats);
        }
        Repr::Zdd => {
            let mgr = ZddManager::new();
            let generators: Vec<_> = system.iter().map(|p| ZddPoly::from_list(&mgr, p)).collect();
            let (basis, stats) = Buchberger::new(config).run(generators, n)?;
            report(&basis, &stats);
            println!("mgr = {:?}", mgr);
            if args.dot {
                let roots: Vec<_> = basis.iter().map(|g| g.root()).collect();
                println!("{}", mgr.to_dot(&roots)?);
            }
        }
    }
    println!("Done in {:.3} s", time_total.elapsed().as_secs_f64());

    Ok(())
}
