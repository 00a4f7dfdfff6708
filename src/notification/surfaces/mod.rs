//! 具体显示面实现

pub mod terminal;

pub use terminal::TerminalSurface;
