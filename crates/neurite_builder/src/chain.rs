//! Sample linking and section chaining, shared by the primary tree and the
//! mitochondria overlay.

use std::collections::HashMap;

use neurite_foundation::{Error, ErrorContext, ROOT_SAMPLE, Result, SampleId};

/// Samples linked by parent index.
#[derive(Debug)]
pub(crate) struct SampleGraph {
    pub parents: Vec<Option<usize>>,
    pub children: Vec<Vec<usize>>,
}

impl SampleGraph {
    /// Resolves `(id, parent)` pairs given in stream order.
    ///
    /// A parent must appear before its child. Duplicate ids and self-parents
    /// are `IdSequence` errors; unresolved parents are `MissingParent`.
    pub fn link(samples: impl IntoIterator<Item = (SampleId, SampleId)>) -> Result<Self> {
        let mut index: HashMap<SampleId, usize> = HashMap::new();
        let mut parents = Vec::new();
        let mut children: Vec<Vec<usize>> = Vec::new();

        for (i, (id, parent)) in samples.into_iter().enumerate() {
            if id < 0 {
                return Err(Error::id_sequence(format!("negative sample id {id}"))
                    .with_context(ErrorContext::new().with_sample(id)));
            }
            if index.insert(id, i).is_some() {
                return Err(Error::id_sequence(format!("duplicate sample id {id}"))
                    .with_context(ErrorContext::new().with_sample(id)));
            }
            let parent = if parent == ROOT_SAMPLE {
                None
            } else if parent == id {
                return Err(Error::id_sequence(format!("sample {id} is its own parent"))
                    .with_context(ErrorContext::new().with_sample(id)));
            } else {
                match index.get(&parent) {
                    Some(&p) => Some(p),
                    None => return Err(Error::missing_parent(id, parent)),
                }
            };
            if let Some(p) = parent {
                children[p].push(i);
            }
            parents.push(parent);
            children.push(Vec::new());
        }

        Ok(Self { parents, children })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.parents.len()
    }
}

/// A maximal run of samples forming one section.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Chain {
    /// Sample indices, in order.
    pub samples: Vec<usize>,
    /// Index of the parent chain.
    pub parent: Option<usize>,
}

/// Splits a sample graph into sections.
///
/// Starting from each sample of `starts` in order, a chain grows while the
/// current sample has exactly one child accepted by `continues` (and passed
/// by `include`). The children of a chain's last sample that `include`
/// accepts start child chains. Chains come out in depth-first pre-order, so
/// a chain's index is its section id and parents precede children.
pub(crate) fn chain(
    graph: &SampleGraph,
    starts: &[usize],
    include: impl Fn(usize) -> bool,
    continues: impl Fn(usize, usize) -> bool,
) -> Vec<Chain> {
    let mut chains = Vec::new();
    let mut stack: Vec<(usize, Option<usize>)> =
        starts.iter().rev().map(|&start| (start, None)).collect();

    while let Some((start, parent)) = stack.pop() {
        let mut samples = vec![start];
        let mut current = start;
        loop {
            let kids: Vec<usize> = graph.children[current]
                .iter()
                .copied()
                .filter(|&k| include(k))
                .collect();
            match kids.as_slice() {
                [only] if continues(current, *only) => {
                    current = *only;
                    samples.push(current);
                }
                _ => {
                    let index = chains.len();
                    stack.extend(kids.iter().rev().map(|&k| (k, Some(index))));
                    break;
                }
            }
        }
        chains.push(Chain { samples, parent });
    }

    chains
}
