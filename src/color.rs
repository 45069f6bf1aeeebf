/// Card colors handed out round-robin, one per reveal. Purely cosmetic.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CardColor {
    Pink,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Purple,
    Red,
}

/// Rotation order. The cycle period is the length of this table.
pub const PALETTE: [CardColor; 8] = [
    CardColor::Pink,
    CardColor::Orange,
    CardColor::Yellow,
    CardColor::Green,
    CardColor::Teal,
    CardColor::Blue,
    CardColor::Purple,
    CardColor::Red,
];

impl CardColor {
    /// Style class name, as a web front-end would put on the card element.
    pub fn class_name(self) -> &'static str {
        match self {
            CardColor::Pink => "card-pink",
            CardColor::Orange => "card-orange",
            CardColor::Yellow => "card-yellow",
            CardColor::Green => "card-green",
            CardColor::Teal => "card-teal",
            CardColor::Blue => "card-blue",
            CardColor::Purple => "card-purple",
            CardColor::Red => "card-red",
        }
    }

    /// 256-color ANSI foreground sequence for the terminal card.
    pub fn ansi(self) -> &'static str {
        match self {
            CardColor::Pink => "\x1b[38;5;205m",
            CardColor::Orange => "\x1b[38;5;208m",
            CardColor::Yellow => "\x1b[38;5;220m",
            CardColor::Green => "\x1b[38;5;41m",
            CardColor::Teal => "\x1b[38;5;37m",
            CardColor::Blue => "\x1b[38;5;33m",
            CardColor::Purple => "\x1b[38;5;135m",
            CardColor::Red => "\x1b[38;5;196m",
        }
    }
}

/// Round-robin cursor over [`PALETTE`].
#[derive(Debug, Default, Clone)]
pub struct ColorCycle {
    index: usize,
}

impl ColorCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the color at the cursor and move the cursor one step (mod 8).
    pub fn advance(&mut self) -> CardColor {
        let color = PALETTE[self.index];
        self.index = (self.index + 1) % PALETTE.len();
        color
    }
}
