//! Property tests for the structural invariants of grown and varied trees.

use proptest::prelude::*;
use u_symreg::gp::init::{random_tree, ramped_half_and_half};
use u_symreg::gp::operators::{crossover, mutate};
use u_symreg::gp::{evaluate, Individual, Method, Node, SymbolTable};
use u_symreg::random::create_rng;

fn symbols() -> SymbolTable {
    SymbolTable::new([
        ("+", 2),
        ("-", 2),
        ("*", 2),
        ("/", 2),
        ("neg", 1),
        ("x0", 0),
        ("x1", 0),
        ("1", 0),
        ("0.5", 0),
    ])
    .unwrap()
}

fn method(full: bool) -> Method {
    if full {
        Method::Full
    } else {
        Method::Grow
    }
}

/// Depths collected by an independent recursive walk in pre-order.
fn recursive_depths(node: &Node, depth: usize, out: &mut Vec<(String, usize)>) {
    out.push((node.symbol().to_string(), depth));
    for child in node.children() {
        recursive_depths(child, depth + 1, out);
    }
}

proptest! {
    #[test]
    fn grown_trees_are_well_formed(seed in any::<u64>(), max_depth in 1usize..7, full in any::<bool>()) {
        let symbols = symbols();
        let mut rng = create_rng(seed);
        let tree = random_tree(max_depth, method(full), &symbols, &mut rng).unwrap();
        prop_assert!(symbols.is_well_formed(&tree).unwrap());
        prop_assert!(tree.max_depth() <= max_depth);
    }

    #[test]
    fn indexing_round_trip(seed in any::<u64>(), max_depth in 1usize..7) {
        let symbols = symbols();
        let mut rng = create_rng(seed);
        let tree = random_tree(max_depth, Method::Grow, &symbols, &mut rng).unwrap();

        let mut expected = Vec::new();
        recursive_depths(&tree, 0, &mut expected);
        prop_assert_eq!(expected.len(), tree.count_nodes());

        for (i, (symbol, depth)) in expected.iter().enumerate() {
            prop_assert_eq!(tree.node_at(i).unwrap().symbol(), symbol.as_str());
            prop_assert_eq!(tree.depth_at(i).unwrap(), *depth);
        }
        prop_assert!(tree.node_at(expected.len()).is_err());

        let deepest = expected.iter().map(|(_, d)| *d).max().unwrap_or(0);
        prop_assert_eq!(tree.max_depth(), deepest);
    }

    #[test]
    fn replace_at_only_changes_target(seed in any::<u64>(), pick in any::<prop::sample::Index>()) {
        let symbols = symbols();
        let mut rng = create_rng(seed);
        let tree = random_tree(5, Method::Grow, &symbols, &mut rng).unwrap();
        let index = pick.index(tree.count_nodes());

        let mut replaced = tree.clone();
        let old = replaced.replace_at(index, Node::leaf("x1")).unwrap();
        prop_assert_eq!(&old, tree.node_at(index).unwrap());
        prop_assert_eq!(replaced.node_at(index).unwrap(), &Node::leaf("x1"));
        prop_assert_eq!(replaced.depth_at(index).unwrap(), tree.depth_at(index).unwrap());
        prop_assert_eq!(
            replaced.count_nodes(),
            tree.count_nodes() - old.count_nodes() + 1
        );
        // Nodes before the target keep their positions.
        for i in 0..index {
            prop_assert_eq!(
                replaced.node_at(i).unwrap().symbol(),
                tree.node_at(i).unwrap().symbol()
            );
        }
    }

    #[test]
    fn crossover_preserves_arity(seed in any::<u64>(), p in 0.0f64..=1.0) {
        let symbols = symbols();
        let mut rng = create_rng(seed);
        let pop = ramped_half_and_half(8, 5, &symbols, &mut rng).unwrap();
        for pair in pop.windows(2) {
            let (a, b) = crossover(&pair[0], &pair[1], p, &symbols, &mut rng).unwrap();
            prop_assert!(symbols.is_well_formed(&a.genome).unwrap());
            prop_assert!(symbols.is_well_formed(&b.genome).unwrap());
            prop_assert_eq!(
                a.genome.count_nodes() + b.genome.count_nodes(),
                pair[0].genome.count_nodes() + pair[1].genome.count_nodes()
            );
        }
    }

    #[test]
    fn mutation_preserves_arity_and_bound(seed in any::<u64>(), max_depth in 1usize..6) {
        let symbols = symbols();
        let mut rng = create_rng(seed);
        let mut ind = Individual::new(random_tree(max_depth, Method::Grow, &symbols, &mut rng).unwrap());
        for _ in 0..20 {
            ind = mutate(&ind, 1.0, max_depth, &symbols, &mut rng).unwrap();
            prop_assert!(symbols.is_well_formed(&ind.genome).unwrap());
            prop_assert!(ind.genome.max_depth() <= max_depth);
        }
    }

    #[test]
    fn protected_division_never_fails(x in -1e3f64..1e3, y in -1e-6f64..1e-6) {
        let tree = Node::new("/", vec![Node::leaf("x0"), Node::leaf("x1")]);
        let value = evaluate(&tree, &[x, y]).unwrap();
        prop_assert_eq!(value.to_bits(), x.to_bits());
    }
}
