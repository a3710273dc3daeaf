extern crate potential_spline;

use std::path::PathBuf;

use potential_spline::{init_global, RegistryConfig};

/// Builds the singlet and triplet potentials from the fixture tables and prints
/// both curves. Set `RUST_LOG=debug` to see the loader output.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data");

    let registry = init_global(&RegistryConfig::with_base_dir(data_dir))?;
    let singlet = registry.singlet()?;
    let triplet = registry.triplet()?;

    let (r_min, r_max) = singlet.domain();
    let number_of_steps = 100;
    let step = (r_max - r_min) / number_of_steps as f64;

    let r_vector: Vec<f64> = (0..=number_of_steps).map(|i| r_min + step * i as f64).collect();
    let singlet_values = singlet.batch_interpolate(&r_vector)?;
    let triplet_values = triplet.batch_extrapolate(&r_vector);

    println!("r;singlet;triplet");
    for i in 0..=number_of_steps {
        println!("{:.3};{:.6e};{:.6e}", r_vector[i], singlet_values[i], triplet_values[i]);
    }

    for name in registry.unbound_tables() {
        eprintln!("note: table '{}' was loaded without an interpolant", name);
    }
    Ok(())
}
