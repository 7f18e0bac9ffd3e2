use std::{
    cmp::Ordering,
    collections::VecDeque,
    fmt::Debug,
    io, mem,
    ops::{Deref, DerefMut},
    sync::Arc,
};

use log::{debug, warn};
use rand::Rng;

use crate::depth::Depth;
use crate::error::Error;

type CmpFn<K> = dyn Fn(&K, &K) -> Ordering + Send + Sync;

/// Comparator injected while constructing a [`Llrb`] instance. It must
/// establish a strict total order over keys, returning `Less`, `Equal`
/// or `Greater` for its first argument against the second.
pub type Comparator<K> = Arc<CmpFn<K>>;

/// Llrb manage a single instance of in-memory ordered map using
/// [left-leaning-red-black][llrb] tree. Every node counts the entries
/// in its sub-tree, which makes rank, select and counted range queries
/// logarithmic.
///
/// [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree
#[derive(Clone)]
pub struct Llrb<K, V>
where
    K: Clone,
    V: Clone,
{
    name: String,
    root: Option<Box<Node<K, V>>>,
    cmp: Comparator<K>,
}

/// Different ways to construct a new Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: 'static + Clone + Ord,
    V: Clone,
{
    /// Create an empty instance of Llrb, identified by `name`, ordering
    /// keys by their natural order. Applications can choose unique names.
    pub fn new<S>(name: S) -> Llrb<K, V>
    where
        S: AsRef<str>,
    {
        Llrb::with_comparator(name, <K as Ord>::cmp)
    }

    /// Create a new instance of Llrb tree and load it with entries
    /// from `iter`. Note that iterator should return (key, value) tuples,
    /// where key must be ``unique``.
    pub fn load_from<S, I>(name: S, iter: I) -> Result<Llrb<K, V>, Error<K>>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut llrb = Llrb::new(name);
        for (key, value) in iter {
            llrb.create(key, value)?;
        }
        debug!("llrb {}: loaded {} entries", llrb.name, llrb.len());
        Ok(llrb)
    }
}

impl<K, V> Llrb<K, V>
where
    K: 'static + Clone,
    V: Clone,
{
    /// Create an empty instance of Llrb, identified by `name`, ordering
    /// keys with `cmp`.
    pub fn with_comparator<S, F>(name: S, cmp: F) -> Llrb<K, V>
    where
        S: AsRef<str>,
        F: 'static + Fn(&K, &K) -> Ordering + Send + Sync,
    {
        Llrb {
            name: name.as_ref().to_string(),
            root: Default::default(),
            cmp: Arc::new(cmp),
        }
    }
}

/// Maintenance API.
impl<K, V> Llrb<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Identify this instance. Applications can choose unique names while
    /// creating Llrb instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        size(self.root.as_deref())
    }

    /// Same as [`Llrb::len`].
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return the number of nodes on the longest path from root to leaf,
    /// zero for an empty tree.
    pub fn height(&self) -> usize {
        height(self.root.as_deref())
    }

    /// Return quickly with basic statistics, only entries() and node_size()
    /// methods are valid with this statistics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.len(), mem::size_of::<Node<K, V>>())
    }
}

type Upsert<K, V> = (Box<Node<K, V>>, Option<V>);

type Insert<K, V> = (Box<Node<K, V>>, Option<Error<K>>);

type Delete<K, V> = (Option<Box<Node<K, V>>>, Option<V>);

type Delmin<K, V> = (Option<Box<Node<K, V>>>, Option<Box<Node<K, V>>>);

/// Write operations on Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value and return the old value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let root = self.root.take();
        let (mut root, old_value) = Llrb::upsert(&*self.cmp, root, key, value);
        root.set_black();
        self.root = Some(root);
        old_value
    }

    /// Create a new {key, value} entry in the index. If key is already
    /// present return error and leave the old value untouched.
    pub fn create(&mut self, key: K, value: V) -> Result<(), Error<K>> {
        let root = self.root.take();
        let (mut root, error) = Llrb::insert(&*self.cmp, root, key, value);
        root.set_black();
        self.root = Some(root);
        match error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Delete key from this instance and return its value. If key is
    /// not present, then delete is effectively a no-op.
    pub fn del(&mut self, key: &K) -> Option<V> {
        if !self.contains(key) {
            return None;
        }
        let mut root = self.root.take()?;
        if !is_red(root.left_deref()) && !is_red(root.right_deref()) {
            root.set_red();
        }
        let (root, old_value) = Llrb::do_delete(&*self.cmp, root, key);
        self.root = root.map(|mut root| {
            root.set_black();
            root
        });
        old_value
    }

    /// Delete the entry with smallest key and return it. Return
    /// [`Error::EmptyTree`] if there are no entries.
    pub fn del_min(&mut self) -> Result<(K, V), Error<K>> {
        let mut root = match self.root.take() {
            Some(root) => root,
            None => {
                debug!("llrb {}: del_min() on empty tree", self.name);
                return Err(Error::EmptyTree);
            }
        };
        if !is_red(root.left_deref()) && !is_red(root.right_deref()) {
            root.set_red();
        }
        let (root, old_node) = Llrb::delete_min(root);
        self.root = root.map(|mut root| {
            root.set_black();
            root
        });
        old_node.map(|node| node.into_entry()).ok_or(Error::EmptyTree)
    }

    /// Delete the entry with largest key and return it. Return
    /// [`Error::EmptyTree`] if there are no entries.
    pub fn del_max(&mut self) -> Result<(K, V), Error<K>> {
        let mut root = match self.root.take() {
            Some(root) => root,
            None => {
                debug!("llrb {}: del_max() on empty tree", self.name);
                return Err(Error::EmptyTree);
            }
        };
        if !is_red(root.left_deref()) && !is_red(root.right_deref()) {
            root.set_red();
        }
        let (root, old_node) = Llrb::delete_max(root);
        self.root = root.map(|mut root| {
            root.set_black();
            root
        });
        old_node.map(|node| node.into_entry()).ok_or(Error::EmptyTree)
    }

    /// Validate LLRB tree with following rules:
    ///
    /// * Keys are in sort order, within the bounds set by every ancestor.
    /// * Sub-tree size of every node is one more than its children's sum.
    /// * No red right-links, red links lean left.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * `rank(select(i)) == i` for every rank and `select(rank(key)) == key`
    ///   for every key.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, Error<K>> {
        let root = self.root.as_deref();
        let mut depths = Depth::new();
        let cmp = &*self.cmp;
        let blacks = Llrb::validate_tree(cmp, root, false, 0, 0, (None, None), &mut depths)?;
        self.validate_ranks()?;

        let mut stats = self.stats();
        stats.set_blacks(blacks);
        stats.set_depths(depths);
        Ok(stats)
    }
}

/// Read operations on Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Get the value for key.
    pub fn get(&self, key: &K) -> Option<V> {
        self.get_node(key).map(|node| node.value.clone())
    }

    /// Check whether key is present in this instance.
    pub fn contains(&self, key: &K) -> bool {
        self.get_node(key).is_some()
    }

    /// Return the smallest key.
    pub fn min(&self) -> Option<K> {
        let mut nref = self.root.as_deref()?;
        while let Some(left) = nref.left_deref() {
            nref = left;
        }
        Some(nref.key.clone())
    }

    /// Return the largest key.
    pub fn max(&self) -> Option<K> {
        let mut nref = self.root.as_deref()?;
        while let Some(right) = nref.right_deref() {
            nref = right;
        }
        Some(nref.key.clone())
    }

    /// Return the largest key less than or equal to `key`.
    pub fn floor(&self, key: &K) -> Option<K> {
        let (mut node, mut best) = (self.root.as_deref(), None);
        while let Some(nref) = node {
            node = match (self.cmp)(key, &nref.key) {
                Ordering::Less => nref.left_deref(),
                Ordering::Greater => {
                    best = Some(nref);
                    nref.right_deref()
                }
                Ordering::Equal => return Some(nref.key.clone()),
            };
        }
        best.map(|nref| nref.key.clone())
    }

    /// Return the smallest key greater than or equal to `key`.
    pub fn ceiling(&self, key: &K) -> Option<K> {
        let (mut node, mut best) = (self.root.as_deref(), None);
        while let Some(nref) = node {
            node = match (self.cmp)(key, &nref.key) {
                Ordering::Less => {
                    best = Some(nref);
                    nref.left_deref()
                }
                Ordering::Greater => nref.right_deref(),
                Ordering::Equal => return Some(nref.key.clone()),
            };
        }
        best.map(|nref| nref.key.clone())
    }

    /// Return the key of zero-based `rank`, that is the key with exactly
    /// `rank` smaller keys. Return None if `rank` is not in `[0, len)`.
    pub fn select(&self, rank: usize) -> Option<K> {
        if rank >= self.len() {
            return None;
        }
        let (mut node, mut rank) = (self.root.as_deref(), rank);
        while let Some(nref) = node {
            let left_size = size(nref.left_deref());
            node = match rank.cmp(&left_size) {
                Ordering::Less => nref.left_deref(),
                Ordering::Greater => {
                    rank -= left_size + 1;
                    nref.right_deref()
                }
                Ordering::Equal => return Some(nref.key.clone()),
            };
        }
        None
    }

    /// Return the number of keys strictly smaller than `key`. `key`
    /// need not be present.
    pub fn rank(&self, key: &K) -> usize {
        let (mut node, mut rank) = (self.root.as_deref(), 0);
        while let Some(nref) = node {
            node = match (self.cmp)(key, &nref.key) {
                Ordering::Less => nref.left_deref(),
                Ordering::Greater => {
                    rank += size(nref.left_deref()) + 1;
                    nref.right_deref()
                }
                Ordering::Equal => return rank + size(nref.left_deref()),
            };
        }
        rank
    }

    /// Return all keys in sort order.
    pub fn keys(&self) -> Vec<K> {
        let mut acc = Vec::with_capacity(self.len());
        in_order(self.root.as_deref(), &mut acc);
        acc
    }

    /// Return keys between `lo` and `hi`, both inclusive, in sort order.
    pub fn keys_in(&self, lo: &K, hi: &K) -> Vec<K> {
        let mut acc = vec![];
        Llrb::range_keys(&*self.cmp, self.root.as_deref(), lo, hi, &mut acc);
        acc
    }

    /// Return number of keys between `lo` and `hi`, both inclusive.
    pub fn size_in(&self, lo: &K, hi: &K) -> usize {
        if (self.cmp)(lo, hi) == Ordering::Greater {
            warn!("llrb {}: size_in() over an inverted range", self.name);
            return 0;
        }
        match self.contains(hi) {
            true => self.rank(hi) - self.rank(lo) + 1,
            false => self.rank(hi) - self.rank(lo),
        }
    }

    /// Return keys in level order, root first, breadth first.
    pub fn keys_level_order(&self) -> Vec<K> {
        let mut acc = Vec::with_capacity(self.len());
        let mut queue: VecDeque<&Node<K, V>> = VecDeque::new();
        queue.extend(self.root.as_deref());
        while let Some(nref) = queue.pop_front() {
            acc.push(nref.key.clone());
            queue.extend(nref.left_deref());
            queue.extend(nref.right_deref());
        }
        acc
    }

    /// Return a random entry from this index.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<(K, V)> {
        let mut nref = self.root.as_deref()?;

        let mut at_depth = rng.gen::<u8>() % 40;
        loop {
            let next = match rng.gen::<u8>() % 2 {
                0 => nref.left_deref(),
                _ => nref.right_deref(),
            };
            match next {
                Some(next) if at_depth > 0 => nref = next,
                _ => break Some((nref.key.clone(), nref.value.clone())),
            }
            at_depth -= 1;
        }
    }

    /// Write the tree in a human readable, indented form. One line per
    /// node with its level, sub-tree size, entry, color and side.
    pub fn pretty_print<W>(&self, w: &mut W) -> io::Result<()>
    where
        W: io::Write,
        K: Debug,
        V: Debug,
    {
        writeln!(w, "llrb {}:", self.name)?;
        match self.root.as_deref() {
            None => writeln!(w, "empty"),
            root => print_node(w, 0, root, "root"),
        }
    }
}

impl<K, V> Llrb<K, V>
where
    K: Clone,
    V: Clone,
{
    fn get_node(&self, key: &K) -> Option<&Node<K, V>> {
        let mut node = self.root.as_deref();
        while let Some(nref) = node {
            node = match (self.cmp)(&nref.key, key) {
                Ordering::Less => nref.right_deref(),
                Ordering::Greater => nref.left_deref(),
                Ordering::Equal => return Some(nref),
            };
        }
        None
    }

    fn upsert(
        cmp: &CmpFn<K>,
        node: Option<Box<Node<K, V>>>,
        key: K,
        value: V,
    ) -> Upsert<K, V> {
        let mut node = match node {
            None => return (Node::new(key, value, false /*red*/), None),
            Some(node) => node,
        };

        let old_value = match cmp(&node.key, &key) {
            Ordering::Greater => {
                let (left, o) = Llrb::upsert(cmp, node.left.take(), key, value);
                node.left = Some(left);
                o
            }
            Ordering::Less => {
                let (right, o) = Llrb::upsert(cmp, node.right.take(), key, value);
                node.right = Some(right);
                o
            }
            Ordering::Equal => Some(node.set_value(value)),
        };
        (Llrb::walkuprot_23(node), old_value)
    }

    fn insert(
        cmp: &CmpFn<K>,
        node: Option<Box<Node<K, V>>>,
        key: K,
        value: V,
    ) -> Insert<K, V> {
        let mut node = match node {
            None => return (Node::new(key, value, false /*red*/), None),
            Some(node) => node,
        };

        let err = match cmp(&node.key, &key) {
            Ordering::Greater => {
                let (left, e) = Llrb::insert(cmp, node.left.take(), key, value);
                node.left = Some(left);
                e
            }
            Ordering::Less => {
                let (right, e) = Llrb::insert(cmp, node.right.take(), key, value);
                node.right = Some(right);
                e
            }
            Ordering::Equal => Some(Error::OverwriteKey),
        };
        (Llrb::walkuprot_23(node), err)
    }

    fn do_delete(cmp: &CmpFn<K>, mut node: Box<Node<K, V>>, key: &K) -> Delete<K, V> {
        if cmp(key, &node.key) == Ordering::Less {
            if node.left.is_none() {
                return (Some(node), None);
            }
            let left = node.left_deref();
            if !is_red(left) && !is_red(left.and_then(Node::left_deref)) {
                node = Llrb::move_red_left(node);
            }
            let (left, old_value) = match node.left.take() {
                Some(left) => Llrb::do_delete(cmp, left, key),
                None => (None, None),
            };
            node.left = left;
            (Some(Llrb::fixup(node)), old_value)
        } else {
            if is_red(node.left_deref()) {
                node = Llrb::rotate_right(node);
            }

            if cmp(key, &node.key) == Ordering::Equal && node.right.is_none() {
                return (None, Some(node.into_entry().1));
            }

            let right = node.right_deref();
            let ok = right.is_some() && !is_red(right);
            if ok && !is_red(right.and_then(Node::left_deref)) {
                node = Llrb::move_red_right(node);
            }

            match (cmp(key, &node.key), node.right.take()) {
                (Ordering::Equal, Some(right)) => {
                    // swap in the in-order successor, then drop it from right.
                    let (right, res_node) = Llrb::delete_min(right);
                    node.right = right;
                    let old_value = res_node.map(|subdel| {
                        let (skey, svalue) = subdel.into_entry();
                        node.key = skey;
                        node.set_value(svalue)
                    });
                    (Some(Llrb::fixup(node)), old_value)
                }
                (_, Some(right)) => {
                    let (right, old_value) = Llrb::do_delete(cmp, right, key);
                    node.right = right;
                    (Some(Llrb::fixup(node)), old_value)
                }
                (_, None) => (Some(Llrb::fixup(node)), None),
            }
        }
    }

    fn delete_min(mut node: Box<Node<K, V>>) -> Delmin<K, V> {
        if node.left.is_none() {
            return (None, Some(node));
        }
        let left = node.left_deref();
        if !is_red(left) && !is_red(left.and_then(Node::left_deref)) {
            node = Llrb::move_red_left(node);
        }
        let (left, old_node) = match node.left.take() {
            Some(left) => Llrb::delete_min(left),
            None => (None, None),
        };
        node.left = left;
        (Some(Llrb::fixup(node)), old_node)
    }

    fn delete_max(mut node: Box<Node<K, V>>) -> Delmin<K, V> {
        if is_red(node.left_deref()) {
            node = Llrb::rotate_right(node);
        }
        if node.right.is_none() {
            return (None, Some(node));
        }
        let right = node.right_deref();
        if !is_red(right) && !is_red(right.and_then(Node::left_deref)) {
            node = Llrb::move_red_right(node);
        }
        let (right, old_node) = match node.right.take() {
            Some(right) => Llrb::delete_max(right),
            None => (None, None),
        };
        node.right = right;
        (Some(Llrb::fixup(node)), old_node)
    }

    fn range_keys(
        cmp: &CmpFn<K>,
        node: Option<&Node<K, V>>,
        lo: &K,
        hi: &K,
        acc: &mut Vec<K>,
    ) {
        let node = match node {
            None => return,
            Some(node) => node,
        };

        let (cl, ch) = (cmp(lo, &node.key), cmp(hi, &node.key));
        if cl == Ordering::Less {
            Llrb::range_keys(cmp, node.left_deref(), lo, hi, acc);
        }
        if cl != Ordering::Greater && ch != Ordering::Less {
            acc.push(node.key.clone());
        }
        if ch == Ordering::Greater {
            Llrb::range_keys(cmp, node.right_deref(), lo, hi, acc);
        }
    }

    fn validate_tree(
        cmp: &CmpFn<K>,
        node: Option<&Node<K, V>>,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        (low, high): (Option<&K>, Option<&K>),
        depths: &mut Depth,
    ) -> Result<usize, Error<K>> {
        let node = match node {
            None => {
                depths.sample(depth);
                return Ok(nb);
            }
            Some(node) => node,
        };

        let red = !node.is_black();
        if fromred && red {
            return Err(Error::ConsecutiveReds(node.key.clone()));
        }
        if is_red(node.right_deref()) {
            return Err(Error::RightLeaning(node.key.clone()));
        }
        if let Some(low) = low {
            if cmp(&node.key, low) != Ordering::Greater {
                return Err(Error::SortError(node.key.clone(), low.clone()));
            }
        }
        if let Some(high) = high {
            if cmp(&node.key, high) != Ordering::Less {
                return Err(Error::SortError(node.key.clone(), high.clone()));
            }
        }
        let (left, right) = (node.left_deref(), node.right_deref());
        let n = 1 + size(left) + size(right);
        if node.size != n {
            return Err(Error::SizeMismatch(node.key.clone(), node.size, n));
        }
        if !red {
            nb += 1;
        }

        let key = Some(&node.key);
        let lblacks = Llrb::validate_tree(cmp, left, red, nb, depth + 1, (low, key), depths)?;
        let rblacks = Llrb::validate_tree(cmp, right, red, nb, depth + 1, (key, high), depths)?;
        if lblacks != rblacks {
            let err = format!("left: {} right: {}", lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }
        Ok(lblacks)
    }

    // keys() is in sort order, so select(i) must return the i-th key
    // and that key must have rank i.
    fn validate_ranks(&self) -> Result<(), Error<K>> {
        for (i, key) in self.keys().into_iter().enumerate() {
            match self.select(i) {
                Some(other) if (self.cmp)(&key, &other) == Ordering::Equal => (),
                Some(other) => return Err(Error::SelectMismatch(key, other)),
                None => return Err(Error::SelectMissing(i)),
            }
            let rank = self.rank(&key);
            if rank != i {
                return Err(Error::RankMismatch(i, rank));
            }
        }
        Ok(())
    }

    //--------- rotation routines for 2-3 algorithm ----------------

    fn walkuprot_23(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if is_red(node.right_deref()) && !is_red(node.left_deref()) {
            node = Llrb::rotate_left(node);
        }
        let left = node.left_deref();
        if is_red(left) && is_red(left.and_then(Node::left_deref)) {
            node = Llrb::rotate_right(node);
        }
        if is_red(node.left_deref()) && is_red(node.right_deref()) {
            Llrb::flip(node.deref_mut())
        }
        node.update_size();
        node
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    (r)                 (r)  \
    //            /       \                 /     \
    //          left       x             node      xr
    //                    / \            /  \
    //                  xl   xr       left   xl
    //
    fn rotate_left(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        let mut x = match node.right.take() {
            Some(x) if !x.is_black() => x,
            _ => panic!("rotate_left(): rotating a black link ? Call the programmer"),
        };
        node.right = x.left.take();
        x.black = node.black;
        x.size = node.size;
        node.set_red();
        node.update_size();
        x.left = Some(node);
        x
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //            (r)   \                   (r)  \
    //           /       \                 /      \
    //          x       right             xl      node
    //         / \                                / \
    //       xl   xr                             xr  right
    //
    fn rotate_right(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        let mut x = match node.left.take() {
            Some(x) if !x.is_black() => x,
            _ => panic!("rotate_right(): rotating a black link ? Call the programmer"),
        };
        node.left = x.right.take();
        x.black = node.black;
        x.size = node.size;
        node.set_red();
        node.update_size();
        x.right = Some(node);
        x
    }

    //        (x)                   (!x)
    //         |                     |
    //        node                  node
    //        / \                   / \
    //      (y) (z)              (!y) (!z)
    //     /      \              /      \
    //   left    right         left    right
    //
    fn flip(node: &mut Node<K, V>) {
        if let Some(left) = node.left.as_deref_mut() {
            left.toggle_link();
        }
        if let Some(right) = node.right.as_deref_mut() {
            right.toggle_link();
        }
        node.toggle_link();
    }

    // balance on the way up from a delete, red right-links are rotated
    // even when the left-link is also red.
    fn fixup(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if is_red(node.right_deref()) {
            node = Llrb::rotate_left(node);
        }
        let left = node.left_deref();
        if is_red(left) && is_red(left.and_then(Node::left_deref)) {
            node = Llrb::rotate_right(node);
        }
        if is_red(node.left_deref()) && is_red(node.right_deref()) {
            Llrb::flip(node.deref_mut());
        }
        node.update_size();
        node
    }

    fn move_red_left(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        Llrb::flip(node.deref_mut());
        if is_red(node.right_deref().and_then(Node::left_deref)) {
            node.right = node.right.take().map(Llrb::rotate_right);
            node = Llrb::rotate_left(node);
            Llrb::flip(node.deref_mut());
        }
        node
    }

    fn move_red_right(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        Llrb::flip(node.deref_mut());
        if is_red(node.left_deref().and_then(Node::left_deref)) {
            node = Llrb::rotate_right(node);
            Llrb::flip(node.deref_mut());
        }
        node
    }
}

fn is_red<K, V>(node: Option<&Node<K, V>>) -> bool {
    node.map_or(false, |node| !node.is_black())
}

fn size<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |node| node.size)
}

fn height<K, V>(node: Option<&Node<K, V>>) -> usize {
    match node {
        None => 0,
        Some(node) => 1 + height(node.left_deref()).max(height(node.right_deref())),
    }
}

fn in_order<K, V>(node: Option<&Node<K, V>>, acc: &mut Vec<K>)
where
    K: Clone,
{
    if let Some(node) = node {
        in_order(node.left_deref(), acc);
        acc.push(node.key.clone());
        in_order(node.right_deref(), acc);
    }
}

fn print_node<W, K, V>(
    w: &mut W,
    level: usize,
    node: Option<&Node<K, V>>,
    side: &str,
) -> io::Result<()>
where
    W: io::Write,
    K: Debug,
    V: Debug,
{
    let node = match node {
        None => return Ok(()),
        Some(node) => node,
    };
    let color = if node.is_black() { "black" } else { "red" };
    writeln!(
        w,
        "{:width$}-level {}, size {}, ({:?}->{:?}) {} {}",
        "",
        level,
        node.size,
        node.key,
        node.value,
        side,
        color,
        width = level
    )?;
    print_node(w, level + 1, node.left_deref(), "left")?;
    print_node(w, level + 1, node.right_deref(), "right")
}

/// Node corresponds to a single entry in Llrb instance.
#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    black: bool,                    // store: black or red
    size: usize,                    // store: number of entries in sub-tree
    left: Option<Box<Node<K, V>>>,  // store: left child
    right: Option<Box<Node<K, V>>>, // store: right child
}

// Primary operations on a single node.
impl<K, V> Node<K, V> {
    // CREATE operation
    fn new(key: K, value: V, black: bool) -> Box<Node<K, V>> {
        Box::new(Node {
            key,
            value,
            black,
            size: 1,
            left: None,
            right: None,
        })
    }

    // detach this node from the tree and return its entry.
    fn into_entry(self: Box<Self>) -> (K, V) {
        let node = *self;
        (node.key, node.value)
    }

    #[inline]
    fn left_deref(&self) -> Option<&Node<K, V>> {
        self.left.as_ref().map(Deref::deref)
    }

    #[inline]
    fn right_deref(&self) -> Option<&Node<K, V>> {
        self.right.as_ref().map(Deref::deref)
    }

    // overwrite value in place, return the old one.
    #[inline]
    fn set_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    #[inline]
    fn update_size(&mut self) {
        self.size = 1 + size(self.left_deref()) + size(self.right_deref());
    }

    #[inline]
    fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    fn toggle_link(&mut self) {
        self.black = !self.black
    }

    #[inline]
    fn is_black(&self) -> bool {
        self.black
    }
}

/// Statistics on [`Llrb`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Llrb::stats`] method.
/// * To get full statistics via [`Llrb::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Llrb`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for `Llrb<k,V>`. Although
    /// the node overhead is constant, the node size varies based on
    /// key and value types. EG:
    ///
    /// ```
    /// use llrb_ordmap::Llrb;
    /// let llrb: Llrb<u64, u64> = Llrb::new("myinstance");
    ///
    /// // size of key: 8 bytes
    /// // size of value: 8 bytes
    /// // overhead is 32 bytes
    /// assert_eq!(llrb.stats().node_size(), 48);
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes from root to leaf, on both left
    /// and right child.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}
