// ============================================================================
// Field Probe
// Reference kernel: one pass over the field in the three chosen types
// ============================================================================

use crate::domain::Field;
use crate::interfaces::Simulation;
use crate::numeric::{NumericResult, Real};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cell marking a wall
pub const WALL: u8 = b'#';

/// What one probe pass measured, converted back to `f64` for reporting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProbeReport {
    /// Canonical names of P, V and VF
    pub types: [String; 3],
    pub open_cells: usize,
    pub wall_cells: usize,
    /// Sum over open cells of `1 / cols`, accumulated in P
    pub quantity_total: f64,
    /// Mean unit velocity over open cells, accumulated and divided in VF
    pub mean_flow: f64,
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "types: p={} v={} v_flow={}",
            self.types[0], self.types[1], self.types[2]
        )?;
        writeln!(
            f,
            "cells: {} open, {} wall",
            self.open_cells, self.wall_cells
        )?;
        writeln!(f, "quantity total: {}", self.quantity_total)?;
        write!(f, "mean flow: {}", self.mean_flow)
    }
}

/// Walks every cell once.
///
/// Open cells contribute `1 / cols` of quantity in P and one unit of
/// velocity, taken in V and carried over into VF. The mean flow is a VF
/// `checked_div`, so a field without open cells yields
/// `NumericError::DivisionByZero` whatever VF is.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldProbe;

impl Simulation for FieldProbe {
    type Output = NumericResult<ProbeReport>;

    fn run<P: Real, V: Real, VF: Real>(&self, field: &Field) -> Self::Output {
        let share = P::from_f64(1.0 / field.cols().max(1) as f64);
        let unit_velocity = V::one();

        let mut quantity = P::zero();
        let mut flow = VF::zero();
        let mut open_cells = 0usize;
        let mut wall_cells = 0usize;

        for &cell in field.as_bytes() {
            if cell == WALL {
                wall_cells += 1;
            } else {
                open_cells += 1;
                quantity = quantity + share;
                flow = flow + VF::from_f64(unit_velocity.to_f64());
            }
        }

        let mean_flow = flow.checked_div(VF::from_int(open_cells as i64))?;

        tracing::debug!(
            "Probe <{}, {}, {}>: {} open, {} wall",
            P::type_name(),
            V::type_name(),
            VF::type_name(),
            open_cells,
            wall_cells
        );

        Ok(ProbeReport {
            types: [P::type_name(), V::type_name(), VF::type_name()],
            open_cells,
            wall_cells,
            quantity_total: quantity.to_f64(),
            mean_flow: mean_flow.to_f64(),
        })
    }
}
