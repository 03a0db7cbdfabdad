//! An ordered set of values with rank queries.
//!
//! [`OrderedSet`] is an unbalanced binary search tree ordered by [`Key`]. Every node records the
//! size of its subtree, which allows retrieving the value at a given position in key order and the
//! position of a given key, both in time proportional to the depth of the tree.
//!
//! Keys are unsigned, so values whose key derives from a negative integer sort after all values
//! with non-negative keys.
use std::{borrow::Borrow, cmp::Ordering, fmt::Debug, iter::FusedIterator};

use crate::{algebra::SetAlgebra, entry::KeyedEntry, error::SetError, util::impl_iterator};
use keyset_util::hash::{Key, KeyHash};

struct Node<T> {
    entry: KeyedEntry<T>,
    size: usize,
    left: Tree<T>,
    right: Tree<T>,
}

type Tree<T> = Option<Box<Node<T>>>;

impl<T> Node<T> {
    fn leaf(entry: KeyedEntry<T>) -> Box<Self> {
        Box::new(Node {
            entry,
            size: 1,
            left: None,
            right: None,
        })
    }
}

fn tree_size<T>(tree: &Tree<T>) -> usize {
    tree.as_ref().map_or(0, |node| node.size)
}

/// A set of values kept in ascending key order, see the [module documentation](self).
pub struct OrderedSet<T> {
    root: Tree<T>,
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for OrderedSet<T> {
    fn clone(&self) -> Self {
        let mut result = Self::new();
        // preorder insertion reproduces the shape of the tree
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            result.attach_cloned(node);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        result
    }
}

impl<T: Debug> Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Drop for OrderedSet<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> OrderedSet<T> {
    /// Returns an empty set.
    pub fn new() -> Self {
        OrderedSet { root: None }
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        tree_size(&self.root)
    }

    /// Returns `true` if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack: Vec<(&Node<T>, usize)> =
            self.root.as_deref().map(|node| (node, 1)).into_iter().collect();
        while let Some((node, level)) = stack.pop() {
            depth = depth.max(level);
            stack.extend(node.left.as_deref().map(|child| (child, level + 1)));
            stack.extend(node.right.as_deref().map(|child| (child, level + 1)));
        }
        depth
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        // a degenerate tree is as deep as it is large, so avoid dropping it recursively
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }

    /// Returns an iterator over the values in ascending key order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.entries(),
        }
    }

    /// Returns an iterator over the values paired with their keys, in ascending key order.
    pub fn entries(&self) -> Entries<'_, T> {
        let mut entries = Entries {
            stack: vec![],
            remaining: self.len(),
        };
        entries.push_left_spine(self.root.as_deref());
        entries
    }

    /// Inserts a value using the given key.
    ///
    /// Returns `false` and drops the passed value if the key is already present.
    pub fn insert_with_key(&mut self, value: T, key: Key) -> Result<bool, SetError> {
        if self.contains_key(key) {
            return Ok(false);
        }
        let mut slot = &mut self.root;
        loop {
            let go_left = match slot.as_deref() {
                None => break,
                Some(node) => key < node.entry.key(),
            };
            let node = slot.as_mut().ok_or(SetError::Internal)?;
            node.size += 1;
            slot = if go_left {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Node::leaf(KeyedEntry::new(value, key)));
        Ok(true)
    }

    /// Removes and returns the value with the given key.
    ///
    /// When the removed node has two children, the smaller child subtree is attached below the
    /// extreme node of the larger one, which then takes the place of the removed node.
    pub fn remove_with_key(&mut self, key: Key) -> Result<T, SetError> {
        if !self.contains_key(key) {
            return Err(SetError::ValueNotFound);
        }
        let mut slot = &mut self.root;
        loop {
            let ordering = match slot.as_deref() {
                None => return Err(SetError::Internal),
                Some(node) => key.cmp(&node.entry.key()),
            };
            if ordering == Ordering::Equal {
                break;
            }
            let node = slot.as_mut().ok_or(SetError::Internal)?;
            node.size -= 1;
            slot = if ordering == Ordering::Less {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        let mut removed = slot.take().ok_or(SetError::Internal)?;
        *slot = merge_children(removed.left.take(), removed.right.take());
        Ok(removed.entry.into_value())
    }

    /// Returns `true` if a value with the given key is present.
    pub fn contains_key(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    /// Returns the value with the given key, if present.
    pub fn get_with_key(&self, key: Key) -> Option<&T> {
        self.find(key).map(|node| node.entry.value())
    }

    fn find(&self, key: Key) -> Option<&Node<T>> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            link = match key.cmp(&node.entry.key()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Returns the value with the smallest key.
    pub fn min(&self) -> Result<&T, SetError> {
        let mut node = self.root.as_deref().ok_or(SetError::EmptySet)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(node.entry.value())
    }

    /// Returns the value with the largest key.
    pub fn max(&self) -> Result<&T, SetError> {
        let mut node = self.root.as_deref().ok_or(SetError::EmptySet)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(node.entry.value())
    }

    /// Returns the value at the given zero based position in ascending key order.
    ///
    /// Fails with [`SetError::EmptySet`] on an empty set and with [`SetError::IndexOutOfRange`] if
    /// `index` is not less than the number of values.
    pub fn get_item(&self, index: usize) -> Result<&T, SetError> {
        let mut node = self.root.as_deref().ok_or(SetError::EmptySet)?;
        if index >= node.size {
            return Err(SetError::IndexOutOfRange);
        }
        let mut index = index;
        loop {
            let left_size = tree_size(&node.left);
            match index.cmp(&left_size) {
                Ordering::Less => node = node.left.as_deref().ok_or(SetError::Internal)?,
                Ordering::Equal => return Ok(node.entry.value()),
                Ordering::Greater => {
                    index -= left_size + 1;
                    node = node.right.as_deref().ok_or(SetError::Internal)?;
                }
            }
        }
    }

    /// Returns the zero based position of the given key in ascending key order.
    ///
    /// Fails with [`SetError::EmptySet`] if the key is not present.
    pub fn index_of_key(&self, key: Key) -> Result<usize, SetError> {
        let mut link = self.root.as_deref();
        let mut rank = 0;
        while let Some(node) = link {
            link = match key.cmp(&node.entry.key()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Ok(rank + tree_size(&node.left)),
                Ordering::Greater => {
                    rank += tree_size(&node.left) + 1;
                    node.right.as_deref()
                }
            };
        }
        Err(SetError::EmptySet)
    }

    /// Returns a vector of clones of all values, in ascending key order.
    pub fn to_sorted_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    fn attach_cloned(&mut self, source: &Node<T>)
    where
        T: Clone,
    {
        let key = source.entry.key();
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            node.size += 1;
            slot = if key < node.entry.key() {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Node::leaf(source.entry.clone()));
    }

    #[cfg(test)]
    pub(crate) fn check(&self) {
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            assert_eq!(
                node.size,
                1 + tree_size(&node.left) + tree_size(&node.right)
            );
            if let Some(left) = node.left.as_deref() {
                assert!(left.entry.key() < node.entry.key());
                stack.push(left);
            }
            if let Some(right) = node.right.as_deref() {
                assert!(right.entry.key() > node.entry.key());
                stack.push(right);
            }
        }
        let keys: Vec<Key> = self.entries().map(|entry| entry.key()).collect();
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(keys.len(), self.len());
    }
}

/// Combines the two child subtrees of a removed node into a single subtree.
fn merge_children<T>(left: Tree<T>, right: Tree<T>) -> Tree<T> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(left), Some(right)) => Some(if left.size < right.size {
            log::trace!("splicing {} nodes below the leftmost of {}", left.size, right.size);
            attach_leftmost(right, left)
        } else {
            log::trace!("splicing {} nodes below the rightmost of {}", right.size, left.size);
            attach_rightmost(left, right)
        }),
    }
}

/// Attaches `subtree` as left child of the node with the smallest key in `root`.
fn attach_leftmost<T>(mut root: Box<Node<T>>, subtree: Box<Node<T>>) -> Box<Node<T>> {
    let extra = subtree.size;
    let mut node: &mut Node<T> = &mut root;
    loop {
        node.size += extra;
        match node.left {
            Some(ref mut left) => node = &mut **left,
            None => {
                node.left = Some(subtree);
                break;
            }
        }
    }
    root
}

/// Attaches `subtree` as right child of the node with the largest key in `root`.
fn attach_rightmost<T>(mut root: Box<Node<T>>, subtree: Box<Node<T>>) -> Box<Node<T>> {
    let extra = subtree.size;
    let mut node: &mut Node<T> = &mut root;
    loop {
        node.size += extra;
        match node.right {
            Some(ref mut right) => node = &mut **right,
            None => {
                node.right = Some(subtree);
                break;
            }
        }
    }
    root
}

impl<T: KeyHash> OrderedSet<T> {
    /// Inserts a value, keyed by its content.
    ///
    /// Returns `false` and drops the passed value if an equally keyed value is already present.
    pub fn insert(&mut self, value: T) -> Result<bool, SetError> {
        let key = value.key_hash();
        self.insert_with_key(value, key)
    }

    /// Removes and returns the value keyed like the given value.
    ///
    /// Fails with [`SetError::ValueNotFound`] if no such value is present.
    pub fn remove<Q>(&mut self, value: &Q) -> Result<T, SetError>
    where
        T: Borrow<Q>,
        Q: KeyHash + ?Sized,
    {
        self.remove_with_key(value.key_hash())
    }

    /// Returns `true` if a value keyed like the given value is present.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: KeyHash + ?Sized,
    {
        self.contains_key(value.key_hash())
    }

    /// Returns the position of the value keyed like the given value, in ascending key order.
    pub fn index_of<Q>(&self, value: &Q) -> Result<usize, SetError>
    where
        T: Borrow<Q>,
        Q: KeyHash + ?Sized,
    {
        self.index_of_key(value.key_hash())
    }

    /// Inserts all values of an iterator and returns how many of them were newly inserted.
    pub fn insert_all(&mut self, values: impl IntoIterator<Item = T>) -> Result<usize, SetError> {
        let mut inserted = 0;
        for value in values {
            inserted += self.insert(value)? as usize;
        }
        Ok(inserted)
    }
}

impl<T: Clone> SetAlgebra for OrderedSet<T> {
    type Entry = KeyedEntry<T>;
    type Entries<'s> = Entries<'s, T> where Self: 's;

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> Self::Entries<'_> {
        OrderedSet::entries(self)
    }

    fn contains_entry(&self, entry: &Self::Entry) -> bool {
        self.contains_key(entry.key())
    }

    fn insert_entry(&mut self, entry: Self::Entry) -> Result<bool, SetError> {
        let key = entry.key();
        self.insert_with_key(entry.into_value(), key)
    }

    fn empty_like(&self) -> Self {
        Self::new()
    }
}

impl<T: Clone> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.set_eq(other)
    }
}

impl<T: Clone> PartialOrd for OrderedSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.set_cmp(other)
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the entries of an [`OrderedSet`].
///
/// This struct is created by the [`entries`](OrderedSet::entries) method on [`OrderedSet`].
pub struct Entries<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Entries<'a, T> {
    fn push_left_spine(&mut self, mut link: Option<&'a Node<T>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<T> Clone for Entries<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = &'a KeyedEntry<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Entries<'_, T> {}

impl<T> FusedIterator for Entries<'_, T> {}

/// An iterator over the values of an [`OrderedSet`] in ascending key order.
///
/// This struct is created by the [`iter`](OrderedSet::iter) method on [`OrderedSet`].
pub struct Iter<'a, T> {
    inner: Entries<'a, T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    impl_iterator!(KeyedEntry::value);
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
