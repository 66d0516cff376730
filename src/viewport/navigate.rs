// mviewport -- Zoom, rotate, pan and swipe gesture engine for media viewers
//
// Copyright (c) 2024-2025 Martin van der Werff <github (at) newinnovations.nl>
//
// This file is part of mviewport.
//
// mviewport is free software: you can redistribute it and/or modify it under the terms of
// the GNU Affero General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR
// IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND
// FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR
// BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
// STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use log::debug;

use crate::event::{Direction, ViewportEvent};

use super::Viewport;

impl Viewport {
    /// Sets the length of the item list, pulling the index back into range.
    /// An empty list is shown as a load error until items arrive again.
    pub fn set_item_count(&mut self, count: usize) {
        self.track(|vp| {
            let was_empty = vp.item_count == 0;
            vp.item_count = count;
            if count == 0 {
                vp.index = 0;
                vp.status.loading = false;
                vp.status.load_error = true;
            } else if was_empty {
                vp.index = 0;
                vp.reset_item();
            } else if vp.index >= count {
                vp.index = count - 1;
            }
        });
    }

    pub fn navigate_next(&mut self) {
        self.track(|vp| vp.step(Direction::Next));
    }

    pub fn navigate_prev(&mut self) {
        self.track(|vp| vp.step(Direction::Prev));
    }

    /// Moves to `index` directly. Out-of-range and current indices are ignored.
    pub fn jump_to_index(&mut self, index: usize) {
        if index >= self.item_count || index == self.index {
            return;
        }
        self.track(|vp| vp.change_index(index, None));
    }

    fn target_index(&self, direction: Direction) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        let looping = self.config.loop_navigation;
        match direction {
            Direction::Next if looping => Some((self.index + 1) % self.item_count),
            Direction::Next => Some(self.index + 1).filter(|next| *next < self.item_count),
            Direction::Prev if self.index > 0 => Some(self.index - 1),
            Direction::Prev if looping => Some(self.item_count - 1),
            Direction::Prev => None,
        }
    }

    pub(super) fn step(&mut self, direction: Direction) {
        if let Some(new) = self.target_index(direction) {
            self.change_index(new, Some(direction));
        }
    }

    fn change_index(&mut self, new: usize, direction: Option<Direction>) {
        let old = self.index;
        self.reset_item();
        self.index = new;

        // nobody is watching while detached
        if !self.attached || old == new {
            return;
        }
        debug!("index {old} -> {new}");
        match direction {
            Some(Direction::Next) => self.emit(ViewportEvent::Next { old, new }),
            Some(Direction::Prev) => self.emit(ViewportEvent::Prev { old, new }),
            None => {}
        }
        self.emit(ViewportEvent::IndexChanged { old, new });
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::ViewportConfig,
        event::{Direction, PointerEvent, ViewportEvent},
        point::SizeD,
        viewport::tests::{recorded, Recorded},
    };

    fn config(loop_navigation: bool, right_to_left: bool) -> ViewportConfig {
        ViewportConfig {
            loop_navigation,
            right_to_left,
            ..ViewportConfig::default()
        }
    }

    fn viewport(items: usize, loop_navigation: bool) -> Recorded {
        recorded(
            config(loop_navigation, false),
            SizeD::new(800.0, 600.0),
            SizeD::new(400.0, 300.0),
            items,
        )
    }

    #[test]
    fn test_next_and_prev_emit() {
        let (mut vp, events) = viewport(3, false);
        vp.navigate_next();
        assert_eq!(vp.index(), 1);
        assert_eq!(
            *events.borrow(),
            vec![
                ViewportEvent::Next { old: 0, new: 1 },
                ViewportEvent::IndexChanged { old: 0, new: 1 },
                ViewportEvent::Changed,
            ]
        );

        events.borrow_mut().clear();
        vp.navigate_prev();
        assert_eq!(vp.index(), 0);
        assert_eq!(events.borrow()[0], ViewportEvent::Prev { old: 1, new: 0 });
    }

    #[test]
    fn test_ends_without_loop() {
        let (mut vp, events) = viewport(3, false);
        vp.navigate_prev();
        assert_eq!(vp.index(), 0);
        assert!(vp.nav_buttons().prev_disabled);

        vp.jump_to_index(2);
        assert!(vp.nav_buttons().next_disabled);
        events.borrow_mut().clear();
        vp.navigate_next();
        assert_eq!(vp.index(), 2);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_loop_wraps() {
        let (mut vp, events) = viewport(3, true);
        vp.navigate_prev();
        assert_eq!(vp.index(), 2);
        vp.navigate_next();
        assert_eq!(vp.index(), 0);
        assert!(events
            .borrow()
            .contains(&ViewportEvent::Next { old: 2, new: 0 }));
        let buttons = vp.nav_buttons();
        assert!(!buttons.prev_disabled && !buttons.next_disabled);
    }

    #[test]
    fn test_single_item_loop_does_not_emit() {
        let (mut vp, events) = viewport(1, true);
        vp.navigate_next();
        vp.navigate_prev();
        assert_eq!(vp.index(), 0);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_empty_list_is_a_no_op() {
        let (mut vp, events) = viewport(0, true);
        vp.navigate_next();
        vp.navigate_prev();
        vp.jump_to_index(0);
        assert_eq!(vp.index(), 0);
        assert!(events.borrow().is_empty());
        assert!(vp.status().load_error);
        assert!(vp.nav_buttons().prev_disabled);
        assert!(vp.nav_buttons().next_disabled);
    }

    #[test]
    fn test_jump_to_index() {
        let (mut vp, events) = viewport(5, false);
        vp.toggle_resize();
        vp.jump_to_index(7);
        assert_eq!(vp.index(), 0);

        events.borrow_mut().clear();
        vp.jump_to_index(3);
        assert_eq!(vp.index(), 3);
        assert_eq!(vp.transform().scale(), 1.0);
        assert_eq!(
            *events.borrow(),
            vec![
                ViewportEvent::IndexChanged { old: 0, new: 3 },
                ViewportEvent::Changed
            ]
        );
    }

    #[test]
    fn test_detached_navigation_is_silent() {
        let (mut vp, events) = viewport(3, false);
        vp.detach();
        events.borrow_mut().clear();
        vp.navigate_next();
        assert_eq!(vp.index(), 1);
        assert_eq!(*events.borrow(), vec![ViewportEvent::Changed]);
    }

    #[test]
    fn test_item_count_clamps_index() {
        let (mut vp, _) = viewport(5, false);
        vp.jump_to_index(4);
        vp.set_item_count(2);
        assert_eq!(vp.index(), 1);
    }

    #[test]
    fn test_items_after_empty_list_clear_load_error() {
        let (mut vp, _) = recorded(
            config(false, false),
            SizeD::new(800.0, 600.0),
            SizeD::new(1600.0, 1200.0),
            3,
        );
        vp.set_item_count(0);
        assert!(vp.status().load_error);
        vp.on_pointer_down(&PointerEvent::new(400.0, 300.0));
        assert!(!vp.status().dragging);

        vp.set_item_count(3);
        assert!(!vp.status().load_error);
        assert_eq!(vp.index(), 0);
        vp.on_pointer_down(&PointerEvent::new(400.0, 300.0));
        assert!(vp.status().dragging);
        vp.on_pointer_move(&PointerEvent::new(350.0, 300.0));
        assert_eq!(vp.transform().translate_x(), -50.0);
    }

    #[test]
    fn test_load_error_survives_count_change() {
        let (mut vp, _) = viewport(3, false);
        vp.set_load_error(true);
        vp.set_item_count(5);
        assert!(vp.status().load_error);
    }

    #[test]
    fn test_right_to_left_buttons() {
        let (vp, _) = recorded(
            config(false, true),
            SizeD::new(800.0, 600.0),
            SizeD::new(400.0, 300.0),
            3,
        );
        let buttons = vp.nav_buttons();
        assert_eq!(buttons.left, Direction::Next);
        assert_eq!(buttons.right, Direction::Prev);
        assert!(buttons.prev_disabled);
        assert!(!buttons.next_disabled);
    }
}
