mod date_time_ext;
mod float_ext;

pub use date_time_ext::ToIso8601;
pub use float_ext::RoundTo;
