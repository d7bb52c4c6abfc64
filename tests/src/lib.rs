//! End-to-end scans against loopback fixtures.

#[cfg(test)]
mod scan;
#[cfg(test)]
mod utils;
