// ============================================================================
// Basic Usage Example
// ============================================================================

use fluid_dispatch::numeric::{FastFixed, Fixed};
use fluid_dispatch::prelude::*;
use std::sync::Arc;

fn main() {
    println!("=== Fluid Dispatch Example ===\n");

    // Fixed-point arithmetic
    let three = Fixed::<32, 16>::from_int(3);
    let half = Fixed::<32, 16>::from_raw(32_768);
    let sum = three + half;
    println!("{:?} + {:?} = {:?}", three, half, sum);

    let fast: FastFixed<32, 16> = sum.with_storage();
    println!("Same value in fastest-width storage: {:?}", fast);
    match sum.to_decimal() {
        Ok(d) => println!("Exact decimal: {}\n", d),
        Err(e) => println!("No exact decimal: {}\n", e),
    }

    // Registered types
    let session = DispatchSessionBuilder::<FieldProbe>::new()
        .with_observer(Arc::new(LoggingObserver))
        .build()
        .unwrap();
    print!("{}", session.catalogue().help_text());
    println!();
    print!("{}", session.table().manifest());

    // Run the probe with a few selections
    println!("\n=== Running Probe ===");
    let selections = [
        ["FIXED(32,16)", "FLOAT", "DOUBLE"],
        ["DOUBLE", "DOUBLE", "DOUBLE"],
        ["FIXED(16,8)", "FLOAT", "DOUBLE"],
        ["FLOAT", "FLOAT", "DOUBLE"],
    ];

    for [p, v, vf] in selections {
        let config = RunConfig::new(p, v, vf);
        match session.run(&FieldProbe, &config) {
            Ok(Ok(report)) => println!("\n{}", report),
            Ok(Err(e)) => println!("\n{}, {}, {}: simulation failed: {}", p, v, vf, e),
            Err(e) => println!("\n{}, {}, {}: {} (exit code {})", p, v, vf, e, e.exit_code()),
        }
    }
}
