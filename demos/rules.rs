use std::collections::HashMap;

use logical_matrix::matrix::LogicalMatrix;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let rules = LogicalMatrix::parse(
        "admin | owner & !locked
         (read OR write) AND NOT banned
         guest && read",
    )?;
    println!("rules = {}", rules);
    println!("identifiers = {:?}", rules.unique_identifiers());
    println!(
        "statements = {}, minterms = {}",
        rules.statement_count(),
        rules.minterm_count()
    );

    let denied = !&rules;
    println!("denied = {}", denied);

    let all = rules.combine_statements();
    println!("all = {}", all);

    let mut edited = rules.clone();
    edited.negate_statement(2).remove_statement(0);
    println!("edited = {}", edited);

    let values = HashMap::from([
        ("admin", false),
        ("owner", true),
        ("locked", false),
        ("read", true),
        ("write", false),
        ("banned", false),
        ("guest", false),
    ]);
    for (statement, result) in rules.split_statements().iter().zip(rules.evaluate(&values)) {
        println!("{} => {}", statement, result);
    }
    println!("all => {:?}", all.evaluate(&values));

    // Explain which literals of each minterm fail under the assignment.
    for (i, minterms) in rules.statements().iter().enumerate() {
        for literals in minterms {
            let failing: Vec<String> = literals
                .iter()
                .filter(|lit| !values.get(lit.name()).is_some_and(|&v| lit.holds(v)))
                .map(|lit| lit.to_string())
                .collect();
            println!("statement {}: {:?} fails on {:?}", i, literals, failing);
        }
    }

    Ok(())
}
