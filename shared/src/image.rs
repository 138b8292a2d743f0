pub const MAX_DISPLAY_WIDTH: f64 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplaySize {
    pub natural_width: f64,
    pub natural_height: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    pub fn fit(natural_width: f64, natural_height: f64, max_width: f64) -> Option<Self> {
        if !(natural_width > 0.0 && natural_height > 0.0) || !natural_width.is_finite() {
            return None;
        }
        let width = natural_width.min(max_width);
        let height = natural_height * (width / natural_width);
        Some(Self {
            natural_width,
            natural_height,
            width,
            height,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeTicket(u64);

#[derive(Debug, Default)]
pub struct DecodeTickets {
    generation: u64,
}

impl DecodeTickets {
    pub fn issue(&mut self) -> DecodeTicket {
        self.generation += 1;
        DecodeTicket(self.generation)
    }

    pub fn is_current(&self, ticket: DecodeTicket) -> bool {
        ticket.0 == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_images_are_capped_with_aspect_ratio() {
        let size = DisplaySize::fit(1200.0, 800.0, MAX_DISPLAY_WIDTH).unwrap();
        assert_eq!(size.width, 600.0);
        assert_eq!(size.height, 400.0);
    }

    #[test]
    fn narrow_images_keep_natural_size() {
        let size = DisplaySize::fit(320.0, 240.0, MAX_DISPLAY_WIDTH).unwrap();
        assert_eq!((size.width, size.height), (320.0, 240.0));
    }

    #[test]
    fn display_height_follows_width_ratio() {
        let size = DisplaySize::fit(900.0, 333.0, MAX_DISPLAY_WIDTH).unwrap();
        assert!((size.height - 333.0 * (600.0 / 900.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_images_have_no_display_size() {
        assert!(DisplaySize::fit(0.0, 100.0, MAX_DISPLAY_WIDTH).is_none());
        assert!(DisplaySize::fit(100.0, 0.0, MAX_DISPLAY_WIDTH).is_none());
    }

    #[test]
    fn newer_selection_supersedes_older_decode() {
        let mut tickets = DecodeTickets::default();
        let first = tickets.issue();
        assert!(tickets.is_current(first));
        let second = tickets.issue();
        assert!(!tickets.is_current(first));
        assert!(tickets.is_current(second));
    }
}
