// SPDX-License-Identifier: MPL-2.0
//! Ordered item list with a wrap-around cursor.
//!
//! The cursor is always inside `[0, len)` when the list is non-empty and is
//! `0` when it is empty. Navigation on an empty list returns `None` instead
//! of touching the cursor, so callers never see an out-of-range index.

/// Items shown one at a time, with next/previous wrap-around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel<T> {
    items: Vec<T>,
    current_index: usize,
}

impl<T> Carousel<T> {
    /// Creates an empty carousel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            current_index: 0,
        }
    }

    /// Creates a carousel over `items` with the cursor on the first one.
    #[must_use]
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            items,
            current_index: 0,
        }
    }

    /// Replaces all items, keeping the cursor where it was if still valid.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp();
    }

    /// Appends items at the end. The cursor does not move.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    /// Removes the item at `index` and re-clamps the cursor.
    ///
    /// - removed at or after the cursor: cursor becomes
    ///   `min(cursor, new_len - 1)`
    /// - removed before the cursor: cursor steps back by one so the same
    ///   item stays current
    /// - list now empty: cursor resets to `0`
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);

        if self.items.is_empty() {
            self.current_index = 0;
        } else if index < self.current_index {
            self.current_index -= 1;
        } else {
            self.current_index = self.current_index.min(self.items.len() - 1);
        }
        Some(removed)
    }

    /// Advances the cursor, wrapping to the first item after the last.
    ///
    /// Returns the new current item, or `None` when empty.
    pub fn next(&mut self) -> Option<&T> {
        if self.items.is_empty() {
            return None;
        }
        self.current_index = (self.current_index + 1) % self.items.len();
        self.items.get(self.current_index)
    }

    /// Moves the cursor back, wrapping to the last item before the first.
    ///
    /// Returns the new current item, or `None` when empty.
    pub fn previous(&mut self) -> Option<&T> {
        if self.items.is_empty() {
            return None;
        }
        let len = self.items.len();
        self.current_index = (self.current_index + len - 1) % len;
        self.items.get(self.current_index)
    }

    /// Sets the cursor directly. Out-of-range indices are ignored.
    ///
    /// Returns `true` if the cursor moved to `index`.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.current_index = index;
            true
        } else {
            false
        }
    }

    /// Returns the current item, if any.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.current_index)
    }

    /// Returns the cursor position (`0` when empty).
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Returns the first index whose item matches `predicate`.
    pub fn position(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    /// Returns the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// All items in display order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks if the cursor is on the first item.
    #[must_use]
    pub fn is_at_first(&self) -> bool {
        !self.items.is_empty() && self.current_index == 0
    }

    /// Checks if the cursor is on the last item.
    #[must_use]
    pub fn is_at_last(&self) -> bool {
        !self.items.is_empty() && self.current_index == self.items.len() - 1
    }

    fn clamp(&mut self) {
        if self.items.is_empty() {
            self.current_index = 0;
        } else {
            self.current_index = self.current_index.min(self.items.len() - 1);
        }
    }
}

impl<T> Default for Carousel<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(len: usize) -> Carousel<usize> {
        Carousel::from_items((0..len).collect())
    }

    #[test]
    fn new_carousel_is_empty() {
        let c: Carousel<u8> = Carousel::new();
        assert!(c.is_empty());
        assert_eq!(c.current(), None);
        assert_eq!(c.current_index(), 0);
        assert!(!c.is_at_first());
        assert!(!c.is_at_last());
    }

    #[test]
    fn navigation_on_empty_is_a_no_op() {
        let mut c: Carousel<u8> = Carousel::new();
        assert_eq!(c.next(), None);
        assert_eq!(c.previous(), None);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn next_wraps_around_to_first() {
        let mut c = carousel(3);
        assert_eq!(c.next(), Some(&1));
        assert_eq!(c.next(), Some(&2));
        assert_eq!(c.next(), Some(&0));
    }

    #[test]
    fn previous_wraps_around_to_last() {
        let mut c = carousel(3);
        assert_eq!(c.previous(), Some(&2));
        assert!(c.is_at_last());
    }

    #[test]
    fn next_and_previous_are_inverse() {
        for len in 1..=6 {
            for start in 0..len {
                let mut c = carousel(len);
                assert!(c.select(start));
                c.next();
                c.previous();
                assert_eq!(c.current_index(), start, "next then previous, len {len}");
                c.previous();
                c.next();
                assert_eq!(c.current_index(), start, "previous then next, len {len}");
            }
        }
    }

    #[test]
    fn single_item_navigation_stays_put() {
        let mut c = carousel(1);
        assert_eq!(c.next(), Some(&0));
        assert_eq!(c.previous(), Some(&0));
    }

    #[test]
    fn select_ignores_out_of_range() {
        let mut c = carousel(2);
        assert!(c.select(1));
        assert!(!c.select(2));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn remove_current_last_item_moves_cursor_back() {
        let mut c = carousel(3);
        c.select(2);
        assert_eq!(c.remove(2), Some(2));
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn remove_after_cursor_keeps_cursor() {
        let mut c = carousel(4);
        c.select(1);
        c.remove(3);
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.current(), Some(&1));
    }

    #[test]
    fn remove_before_cursor_keeps_current_item() {
        let mut c = carousel(3);
        c.select(2);
        c.remove(0);
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.current(), Some(&2));
    }

    #[test]
    fn remove_last_remaining_resets_cursor() {
        let mut c = carousel(1);
        c.remove(0);
        assert!(c.is_empty());
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn remove_out_of_range_returns_none() {
        let mut c = carousel(2);
        assert_eq!(c.remove(5), None);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn cursor_stays_in_range_through_any_removal_sequence() {
        for len in 1..=5 {
            for cursor in 0..len {
                for removed in 0..len {
                    let mut c = carousel(len);
                    c.select(cursor);
                    c.remove(removed);
                    if c.is_empty() {
                        assert_eq!(c.current_index(), 0);
                    } else {
                        assert!(c.current_index() < c.len());
                    }
                }
            }
        }
    }

    #[test]
    fn replace_clamps_cursor_into_new_range() {
        let mut c = carousel(5);
        c.select(4);
        c.replace(vec![10, 11]);
        assert_eq!(c.current_index(), 1);
        c.replace(Vec::new());
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn extend_appends_without_moving_cursor() {
        let mut c = carousel(2);
        c.select(1);
        c.extend([7, 8]);
        assert_eq!(c.items(), &[0, 1, 7, 8]);
        assert_eq!(c.current_index(), 1);
    }
}
