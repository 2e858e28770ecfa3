//! Example: serial versus quadrant-parallel LCS length.
//!
//! Run with:
//! `cargo run --example lcs`

use quadrant_lcs::LcsEngineBuilder;

fn main() -> Result<(), quadrant_lcs::LcsError> {
    let s = b"ACCGGTCGAGTGCGCGGAAGCCGGCCGAA";
    let t = b"GTCGTTCGGAATGCCGTTGCTCTGTAAA";

    let engine = LcsEngineBuilder::new().with_parallelism(2).build()?;
    let report = engine.compare(s, t)?;

    println!("Using {} workers.", engine.workers());
    println!("Serial LCS length:   {}", report.serial);
    println!("Parallel LCS length: {}", report.parallel);
    println!(
        "Serial {:?}, parallel {:?}",
        report.serial_elapsed, report.parallel_elapsed
    );
    Ok(())
}
