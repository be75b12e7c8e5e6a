//! A non-empty list with a distinguished center element.
//!
//! Used by the segmented control and the carousel to model "one selected
//! element among many" without a separate selection index that could go out
//! of bounds.

/// A list guaranteed to hold at least one element, the center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipList<T> {
    left: Vec<T>,
    center: T,
    right: Vec<T>,
}

impl<T> ZipList<T> {
    /// A single-element list.
    #[must_use]
    pub fn singleton(center: T) -> Self {
        Self {
            left: Vec::new(),
            center,
            right: Vec::new(),
        }
    }

    #[must_use]
    pub fn new(left: Vec<T>, center: T, right: Vec<T>) -> Self {
        Self {
            left,
            center,
            right,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len() + 1
    }

    /// Never true; the center always exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn center(&self) -> &T {
        &self.center
    }

    /// Index of the center element.
    #[must_use]
    pub fn center_index(&self) -> usize {
        self.left.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.left.len() {
            self.left.get(index)
        } else if index == self.left.len() {
            Some(&self.center)
        } else {
            self.right.get(index - self.left.len() - 1)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.left
            .iter()
            .chain(std::iter::once(&self.center))
            .chain(self.right.iter())
    }

    pub fn map<U>(&self, transform: impl Fn(&T) -> U) -> ZipList<U> {
        ZipList {
            left: self.left.iter().map(&transform).collect(),
            center: transform(&self.center),
            right: self.right.iter().map(&transform).collect(),
        }
    }
}

impl<T: Clone> ZipList<T> {
    /// Move the center `count` positions to the right, or `None` when there
    /// are not enough elements on that side.
    #[must_use]
    pub fn shift_left(&self, count: usize) -> Option<ZipList<T>> {
        if count > self.right.len() {
            return None;
        }
        if count == 0 {
            return Some(self.clone());
        }
        let mut left = self.left.clone();
        left.push(self.center.clone());
        left.extend_from_slice(&self.right[..count - 1]);
        Some(ZipList {
            left,
            center: self.right[count - 1].clone(),
            right: self.right[count..].to_vec(),
        })
    }

    /// Move the center `count` positions to the left, or `None` when there
    /// are not enough elements on that side.
    #[must_use]
    pub fn shift_right(&self, count: usize) -> Option<ZipList<T>> {
        if count > self.left.len() {
            return None;
        }
        if count == 0 {
            return Some(self.clone());
        }
        let pivot = self.left.len() - count;
        let mut right = self.left[pivot + 1..].to_vec();
        right.push(self.center.clone());
        right.extend_from_slice(&self.right);
        Some(ZipList {
            left: self.left[..pivot].to_vec(),
            center: self.left[pivot].clone(),
            right,
        })
    }
}
