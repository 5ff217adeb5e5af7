/// The eight DMG buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::Right,
        Button::Left,
        Button::Up,
        Button::Down,
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
    ];

    /// `true` for the d-pad, `false` for A/B/Select/Start.
    #[inline]
    pub fn is_direction(self) -> bool {
        matches!(self, Button::Right | Button::Left | Button::Up | Button::Down)
    }

    /// Bit in the P1 low nibble; the same for both groups.
    #[inline]
    fn bit(self) -> u8 {
        match self {
            Button::Right | Button::A => 0x01,
            Button::Left | Button::B => 0x02,
            Button::Up | Button::Select => 0x04,
            Button::Down | Button::Start => 0x08,
        }
    }
}

/// Joypad state behind P1 (FF00).
///
/// Button masks use bit=1 for "pressed"; P1 itself reports pressed
/// buttons as 0.
pub(super) struct Joypad {
    /// P1 bits 5 (actions) and 4 (directions); 0 selects the group.
    select: u8,
    directions: u8,
    actions: u8,
}

impl Joypad {
    pub(super) fn new() -> Self {
        Self {
            select: 0x30,
            directions: 0,
            actions: 0,
        }
    }

    pub(super) fn read(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & 0x10 == 0 {
            low &= !self.directions;
        }
        if self.select & 0x20 == 0 {
            low &= !self.actions;
        }
        0xC0 | self.select | (low & 0x0F)
    }

    /// Only the select bits are writable.
    pub(super) fn write(&mut self, value: u8) {
        self.select = value & 0x30;
    }

    fn group_selected(&self, button: Button) -> bool {
        let select_bit = if button.is_direction() { 0x10 } else { 0x20 };
        self.select & select_bit == 0
    }

    /// Record a press. Returns `true` when the press should raise the
    /// Joypad interrupt: the button was up and its group is selected.
    pub(super) fn press(&mut self, button: Button) -> bool {
        let selected = self.group_selected(button);
        let mask = if button.is_direction() {
            &mut self.directions
        } else {
            &mut self.actions
        };
        let was_pressed = *mask & button.bit() != 0;
        *mask |= button.bit();
        !was_pressed && selected
    }

    pub(super) fn release(&mut self, button: Button) {
        let mask = if button.is_direction() {
            &mut self.directions
        } else {
            &mut self.actions
        };
        *mask &= !button.bit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unselected_groups_read_high() {
        let mut joypad = Joypad::new();
        joypad.press(Button::A);
        joypad.press(Button::Down);
        assert_eq!(joypad.read(), 0xFF);
    }

    #[test]
    fn selected_group_reports_pressed_as_zero() {
        let mut joypad = Joypad::new();
        joypad.write(0x20); // directions selected
        joypad.press(Button::Down);
        joypad.press(Button::A);
        assert_eq!(joypad.read(), 0xE7);

        joypad.write(0x10); // actions selected
        assert_eq!(joypad.read(), 0xDE);

        joypad.release(Button::A);
        assert_eq!(joypad.read(), 0xDF);
    }

    #[test]
    fn press_reports_interrupt_only_on_new_selected_press() {
        let mut joypad = Joypad::new();
        joypad.write(0x10);
        assert!(joypad.press(Button::Start));
        assert!(!joypad.press(Button::Start), "already held");
        assert!(!joypad.press(Button::Up), "direction group not selected");
    }
}
