// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The orbit of a sample is the sequence of values z takes as we
//! repeatedly square it and add the sample back in, starting from
//! zero.  Only orbits that escape are of any use to the Buddhabrot;
//! an orbit still bounded when we give up is discarded whole, even
//! though some of those would have escaped eventually.

use num::Complex;

/// Every point visited by an escaping sample, in order, ending with
/// the point that escaped.  Empty if the sample did not escape.
pub type Orbit = Vec<Complex<f64>>;

/// The squared magnitude beyond which an orbit is considered to have
/// escaped.  Note this is a radius of the square root of two, not
/// the more common two.
pub const ESCAPE_NORM_SQR: f64 = 2.0;

/// Trace the orbit of `c` for at most `limit` iterations.
pub fn trace(c: Complex<f64>, limit: usize) -> Orbit {
    let mut orbit = Vec::with_capacity(limit);
    trace_into(c, limit, &mut orbit);
    orbit
}

/// Trace the orbit of `c` into a buffer owned by the caller,
/// replacing whatever it held.  Returns true if the sample escaped
/// within `limit` iterations; otherwise the buffer is left empty.
pub fn trace_into(c: Complex<f64>, limit: usize, orbit: &mut Vec<Complex<f64>>) -> bool {
    orbit.clear();
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    let mut counter = 0;
    while counter < limit && z.norm_sqr() <= ESCAPE_NORM_SQR {
        z = z * z + c;
        orbit.push(z);
        counter += 1;
    }
    if counter == limit {
        orbit.clear();
        return false;
    }
    true
}
