/// One YOLO-format annotation: class id plus a normalized center/size box.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub class: i32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Parse one annotation line (`class x_center y_center width height`).
    ///
    /// Lines with fewer than 5 fields, or whose first 5 fields are not all
    /// numeric, yield `None`. Fields beyond the fifth are ignored.
    pub fn parse_line(line: &str) -> Option<Self> {
        let fields: Vec<f64> = line
            .split_whitespace()
            .take(5)
            .map(str::parse)
            .collect::<Result<_, _>>()
            .ok()?;

        if fields.len() < 5 {
            return None;
        }

        Some(Self {
            class: fields[0] as i32,
            x: fields[1],
            y: fields[2],
            width: fields[3],
            height: fields[4],
        })
    }
}

/// What a single keystroke means for the image currently on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `y`: move the image and its label to the filtered directories.
    Keep,
    /// `n`: delete both the image and its label.
    Discard,
    /// `p`: move the image to the filtered directory, delete the label.
    KeepImageOnly,
    /// Any other key: leave both files in place and move on.
    Skip,
}

/// Running per-run counters, shown in the top panel.
#[derive(Clone, Debug, Default)]
pub struct Statistics {
    pub kept: usize,
    pub kept_without_label: usize,
    pub discarded: usize,
    pub skipped: usize,
}

impl Statistics {
    pub fn record(&mut self, command: Command) {
        match command {
            Command::Keep => self.kept += 1,
            Command::KeepImageOnly => self.kept_without_label += 1,
            Command::Discard => self.discarded += 1,
            Command::Skip => self.skipped += 1,
        }
    }

    pub fn reviewed(&self) -> usize {
        self.kept + self.kept_without_label + self.discarded + self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_reads_five_fields() {
        let bbox = BoundingBox::parse_line("0 0.5 0.5 0.2 0.2").unwrap();
        assert_eq!(bbox.class, 0);
        assert_eq!(bbox.x, 0.5);
        assert_eq!(bbox.y, 0.5);
        assert_eq!(bbox.width, 0.2);
        assert_eq!(bbox.height, 0.2);
    }

    #[test]
    fn parse_line_ignores_extra_fields() {
        let bbox = BoundingBox::parse_line("2 0.1 0.2 0.3 0.4 0.97").unwrap();
        assert_eq!(bbox.class, 2);
        assert_eq!(bbox.height, 0.4);
    }

    #[test]
    fn parse_line_rejects_short_lines() {
        assert_eq!(BoundingBox::parse_line("0 0.5 0.5"), None);
        assert_eq!(BoundingBox::parse_line(""), None);
    }

    #[test]
    fn parse_line_rejects_non_numeric_fields() {
        assert_eq!(BoundingBox::parse_line("0 0.5 oops 0.2 0.2"), None);
    }

    #[test]
    fn statistics_count_per_command() {
        let mut stats = Statistics::default();
        stats.record(Command::Keep);
        stats.record(Command::Keep);
        stats.record(Command::Discard);
        stats.record(Command::Skip);
        assert_eq!(stats.kept, 2);
        assert_eq!(stats.discarded, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.reviewed(), 4);
    }
}
