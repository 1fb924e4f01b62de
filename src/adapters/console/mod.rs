//! Console stand-ins for the speech collaborators: stdin lines in, printed (and optionally spoken) replies out.

pub mod capture;
pub mod playback;

pub use capture::ConsoleCapture;
pub use playback::ConsolePlayback;
