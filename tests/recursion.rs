pub mod common;
use common::*;

#[derive(Clone, Debug, PartialEq)]
enum Node {
    Leaf(u8),
    Branch(Vec<Node>),
}

impl Node {
    fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Branch(nodes) => nodes.iter().map(|node| node.depth() + 1).max().unwrap_or(0),
        }
    }

    fn leaves(&self) -> Vec<u8> {
        match self {
            Node::Leaf(value) => vec![*value],
            Node::Branch(nodes) => nodes.iter().flat_map(Node::leaves).collect(),
        }
    }

    fn branches(&self) -> Vec<usize> {
        match self {
            Node::Leaf(_) => vec![],
            Node::Branch(nodes) => {
                let mut counts = vec![nodes.len()];
                counts.extend(nodes.iter().flat_map(Node::branches));
                counts
            }
        }
    }
}

fn node() -> boxed::Boxed<Node> {
    (
        Generate::map(0u8..10, Node::Leaf),
        lazy(node)
            .collect_with::<_, Vec<_>>(..4usize)
            .map(Node::Branch)
            .dampen(),
    )
        .any()
        .unify::<Node>()
        .boxed()
}

#[test]
fn recursion_depth_is_bounded() {
    checker(node(), 1).check(|node| node.depth() <= 8).assert();
}

#[test]
fn trees_shrink_to_a_single_leaf() {
    trace();
    let report = checker(node(), 2).check(|node| node.leaves().iter().all(|&value| value < 5));
    let node = report.counterexample().unwrap();
    assert_eq!(node.leaves(), [5]);
    assert!(node.branches().iter().all(|&count| count == 1));
}
