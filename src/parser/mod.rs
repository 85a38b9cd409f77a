pub mod chart_parser;

pub use chart_parser::{ChartData, ChartParser, Parser, RawBar};
