//! Demo: build a biconvex singlet and ray-analyze it
//!
//! Builds the lens as an intersection of two spherical refracting caps
//! with a round aperture, then evaluates distances, identifies governing
//! faces, traces a ray fan, and emits the GLSL evaluator.
//!
//! Usage: cargo run --example singlet_demo
//!
//! Author: Moroya Sakamoto

use lenstrace::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("lenstrace Singlet Demo\n");

    // Biconvex singlet: front cap at z = 0, back cap at z = 5, round
    // aperture of radius 12.5.
    let front = Surface::spherical_sag(50.0, 1.0, DVec3::ZERO)?;
    let back = Surface::spherical_sag(-50.0, -1.0, DVec3::new(0.0, 0.0, 5.0))?;
    let aperture = Surface::infinite_cylinder(DVec2::ZERO, 12.5);
    let lens = Surface::intersection_of(vec![front, back, aperture])?;

    println!("1. Signed distance bounds");
    for (label, point) in [
        ("center of the glass", DVec4::new(0.0, 0.0, 2.5, 1.0)),
        ("in front of the lens", DVec4::new(0.0, 0.0, -3.0, 1.0)),
        ("beyond the aperture", DVec4::new(15.0, 0.0, 2.5, 1.0)),
    ] {
        println!("   {:22} d = {:+.4}", label, eval(&lens, point));
    }

    println!("\n2. Governing face near the front vertex");
    let isdb = identify(&lens, DVec4::new(0.0, 0.0, -0.1, 1.0));
    println!("   d = {:+.4}, leaf = {:?}", isdb.d, isdb.surface.category());

    println!("\n3. Axial ray fan");
    let config = TraceConfig::new(50.0, 1e-9, 500);
    for i in 0..5 {
        let y = 2.5 * f64::from(i);
        let trace = sphere_trace(
            &lens,
            DVec4::new(0.0, y, -10.0, 1.0),
            DVec4::new(0.0, 0.0, 1.0, 0.0),
            &config,
        )?;
        if trace.hit() {
            println!(
                "   y = {:5.2}: hit at t = {:.6} after {} steps",
                y, trace.t, trace.steps
            );
        } else {
            println!("   y = {:5.2}: {:?}", y, trace.outcome);
        }
    }

    println!("\n4. Exit point through the front surface");
    let through = TraceConfig::new(50.0, 1e-9, 50_000).through();
    let inside = sphere_trace(
        &lens,
        DVec4::new(0.0, 0.0, -10.0, 1.0),
        DVec4::new(0.0, 0.0, 1.0, 0.0),
        &through,
    )?;
    println!(
        "   crossed at t = {:.6}, d = {:+.2e} (inside the glass)",
        inside.tm, inside.d
    );

    println!("\n5. GLSL evaluator");
    let shader = GlslShader::transpile(&lens);
    println!(
        "   {} lines, starts with: {}",
        shader.source.lines().count(),
        shader.source.lines().next().unwrap_or_default()
    );

    Ok(())
}
