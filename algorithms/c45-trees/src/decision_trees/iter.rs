use std::collections::VecDeque;
use std::iter::Iterator;

use super::TreeNode;

/// Level-order (BFT) iterator of nodes in a decision tree
///
/// Absent children are skipped.
pub struct NodeIter<'a> {
    queue: VecDeque<&'a TreeNode>,
}

impl<'a> NodeIter<'a> {
    pub fn new(queue: VecDeque<&'a TreeNode>) -> Self {
        NodeIter { queue }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front().map(|node| {
            node.children()
                .iter()
                .filter_map(|x| x.as_ref())
                .for_each(|child| self.queue.push_back(child));

            node
        })
    }
}
