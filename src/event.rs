/// What the user asked for, independent of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Quit,
    Redraw,
    StartCounter,
    IncreaseMaximum,
    DecreaseMaximum,
    TogglePrice,
}

pub struct EventConversionUndefinedError;
