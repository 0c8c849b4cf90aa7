use prop_nexus::core::formula::expr::Expr;
use prop_nexus::core::formula::trace::Rule;
use prop_nexus::parser::ParseError;
use prop_nexus::{are_equivalent, is_satisfiable, parse, to_cnf, to_dnf, Engine, Error};
use prop_nexus_test_utils::{parse_all, truth_table, truth_table_equivalent};
use test_log::test;

#[test]
fn test_implication_is_disjunction() -> color_eyre::Result<()> {
    assert!(are_equivalent("p -> q", "~p | q")?);
    Ok(())
}

#[test]
fn test_cnf_of_implication() -> color_eyre::Result<()> {
    let cnf = to_cnf("(p | q) -> r")?;
    assert_eq!(cnf, "(~p | r) & (~q | r)");
    let exprs = parse_all(&[&cnf, "(~p | r) & (~q | r)", "(p | q) -> r"])?;
    assert!(truth_table_equivalent(&exprs[0], &exprs[1]));
    assert!(truth_table_equivalent(&exprs[0], &exprs[2]), "{}", truth_table(&exprs[0]));
    Ok(())
}

#[test]
fn test_contradiction_is_unsat() -> color_eyre::Result<()> {
    assert!(!is_satisfiable("p & ~p")?);
    Ok(())
}

#[test]
fn test_tautology_is_sat() -> color_eyre::Result<()> {
    assert!(is_satisfiable("p | ~p")?);
    // `p` is a don't-care and is left out of the witness.
    let result = Engine::default().solve("p | ~p")?;
    assert_eq!(result.model().map(|m| m.len()), Some(0));
    Ok(())
}

#[test]
fn test_de_morgan() -> color_eyre::Result<()> {
    assert!(are_equivalent("~(p & q)", "~p | ~q")?);
    assert!(are_equivalent("¬(p ∧ q)", "¬p ∨ ¬q")?);
    Ok(())
}

#[test]
fn test_missing_right_operand() {
    let err = parse("p ->").unwrap_err();
    match err {
        Error::Parse {
            source: ParseError { position, .. },
        } => assert_eq!(position, 4),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_synonyms_and_rendering() -> color_eyre::Result<()> {
    let expr = parse("(p v q) => ¬r ↔ s")?;
    assert_eq!(expr.to_string(), "p | q -> ~r <-> s");
    assert_eq!(parse(expr.to_string())?, expr);
    Ok(())
}

#[test]
fn test_dnf_of_biconditional() -> color_eyre::Result<()> {
    assert_eq!(to_dnf("p <-> q")?, "(p & q) | (~p & ~q)");
    Ok(())
}

#[test]
fn test_variables_in_one_formula_only() -> color_eyre::Result<()> {
    assert!(are_equivalent("p", "p & (q | ~q)")?);
    assert!(!are_equivalent("p", "p & q")?);
    let model = Engine::default().counterexample("p", "p & q")?.unwrap();
    let lhs = Expr::parse("p")?;
    let rhs = Expr::parse("p & q")?;
    assert_ne!(lhs.eval(&model), rhs.eval(&model));
    Ok(())
}

#[test]
fn test_equivalence_names_the_law() -> color_eyre::Result<()> {
    let result = Engine::default().check_equivalence("~(p & q)", "~p | ~q")?;
    assert!(result.is_equivalent());
    assert!(result.trace.contains(Rule::DeMorgan));
    assert!(result.trace.to_string().contains("De Morgan"));
    Ok(())
}

#[test]
fn test_variable_v_survives_rendering() -> color_eyre::Result<()> {
    // Between spaces `v` reads as disjunction.
    assert!(parse("u & v & w").is_err());
    let cnf = to_cnf("u & (v) & w")?;
    assert_eq!(cnf, "u & (v) & w");
    assert!(are_equivalent(cnf.as_str(), "u&v&w")?);
    assert_eq!(to_cnf(cnf)?, "u & (v) & w");
    Ok(())
}

#[test]
fn test_deep_nesting_is_an_error() {
    let input = format!("{}p", "~".repeat(20_000));
    assert!(matches!(is_satisfiable(input.as_str()), Err(Error::Parse { .. })));
}
