use std::{
    collections::HashMap,
    sync::RwLock,
    time::{Duration, Instant},
};

use colored::Colorize;
use once_cell::sync::Lazy;

static PROFILER_TABLE: Lazy<RwLock<HashMap<&'static str, Duration>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn profile<T: FnOnce() -> X, X>(tag: &'static str, f: T) -> X {
    let start = Instant::now();
    let res = f();
    let time = start.elapsed();
    // a poisoned table only loses timings
    if let Ok(mut table) = PROFILER_TABLE.write() {
        *table.entry(tag).or_default() += time;
    }
    res
}

pub fn profile_results() -> Vec<(&'static str, Duration)> {
    let table = match PROFILER_TABLE.read() {
        Ok(table) => table,
        Err(poisoned) => poisoned.into_inner(),
    };
    let mut pairs: Vec<_> = table.iter().map(|(k, v)| (*k, *v)).collect();
    pairs.sort_by(|(_, b), (_, a)| a.cmp(b));
    pairs
}

/// Goes to stderr, stdout is reserved for program output.
pub fn profile_log() {
    eprintln!("{}", "PROFILE RESULTS:".bold());
    for (name, t) in profile_results() {
        eprintln!("    {:20} {:?}", name, t);
    }
}
