// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — aspect-preserving page fitting and slice pagination.

pub mod fit;
pub mod slices;

pub use fit::FitPlan;
pub use slices::PageImage;
