//! Long division for [`BigInteger`].
//!
//! Multi-limb divisors use Knuth's Algorithm D: normalize so the divisor's top
//! limb has its high bit set, estimate each quotient limb from the top two
//! remainder limbs, then multiply back and subtract. The estimate is only ever
//! corrected downward.

use std::num::NonZeroU32;

use super::{BigInteger, LIMB_BASE, LIMB_BITS};
use crate::error::{AddrError, Result};

const LOW_MASK: u64 = LIMB_BASE - 1;

impl BigInteger {
    /// Quotient and remainder of `self / divisor`.
    ///
    /// # Returns
    ///
    /// `(q, r)` with `self == divisor * q + r` and `r < divisor`, or
    /// [`AddrError::DivideByZero`] when `divisor` is zero.
    pub fn div_rem(&self, divisor: &BigInteger) -> Result<(BigInteger, BigInteger)> {
        if divisor.is_zero() {
            return Err(AddrError::DivideByZero);
        }
        if self < divisor {
            return Ok((BigInteger::zero(), self.clone()));
        }
        if let Some(d) = divisor.to_u32().and_then(NonZeroU32::new) {
            let (q, r) = self.div_rem_small(d);
            return Ok((q, BigInteger::from(r)));
        }
        Ok(knuth_divide(&self.le_limbs(), &divisor.le_limbs()))
    }

    pub fn div(&self, divisor: &BigInteger) -> Result<BigInteger> {
        self.div_rem(divisor).map(|(q, _)| q)
    }

    pub fn rem(&self, divisor: &BigInteger) -> Result<BigInteger> {
        self.div_rem(divisor).map(|(_, r)| r)
    }

    /// Remainder modulo a machine word, in one pass from the top limb down.
    pub fn small_mod(&self, divisor: NonZeroU32) -> u32 {
        let d = divisor.get() as u64;
        self.limbs()
            .iter()
            .fold(0u64, |rem, &limb| ((rem << LIMB_BITS) | limb as u64) % d) as u32
    }

    /// Fallible form of [`small_mod`](Self::small_mod) for a runtime divisor.
    pub fn rem_u32(&self, divisor: u32) -> Result<u32> {
        NonZeroU32::new(divisor)
            .map(|d| self.small_mod(d))
            .ok_or(AddrError::DivideByZero)
    }

    /// Quotient and remainder by a single limb.
    pub(crate) fn div_rem_small(&self, divisor: NonZeroU32) -> (BigInteger, u32) {
        let d = divisor.get() as u64;
        let mut rem = 0u64;
        let quotient = self
            .limbs()
            .iter()
            .map(|&limb| {
                let cur = (rem << LIMB_BITS) | limb as u64;
                rem = cur % d;
                (cur / d) as u32
            })
            .collect();
        (BigInteger::from_limbs(quotient), rem as u32)
    }
}

/// Algorithm D over least-significant-first limbs. Requires `v.len() >= 2`
/// and `u >= v`.
fn knuth_divide(u: &[u32], v: &[u32]) -> (BigInteger, BigInteger) {
    let n = v.len();
    let m = u.len();
    let shift = v[n - 1].leading_zeros();

    let vn = shift_limbs_left(v, shift, n);
    let mut un = shift_limbs_left(u, shift, m + 1);
    let mut q = vec![0u32; m - n + 1];

    let v_top = vn[n - 1] as u64;
    let v_next = vn[n - 2] as u64;

    for j in (0..=m - n).rev() {
        let num = ((un[j + n] as u64) << LIMB_BITS) | un[j + n - 1] as u64;
        let mut qhat = num / v_top;
        let mut rhat = num % v_top;

        // qhat >= base short-circuits before the product could overflow
        while qhat >= LIMB_BASE || qhat * v_next > ((rhat << LIMB_BITS) | un[j + n - 2] as u64) {
            qhat -= 1;
            rhat += v_top;
            if rhat >= LIMB_BASE {
                break;
            }
        }

        // Multiply and subtract qhat * vn from un[j..=j+n].
        let mut carry = 0u64;
        let mut borrow = 0u64;
        for i in 0..n {
            let p = qhat * vn[i] as u64 + carry;
            carry = p >> LIMB_BITS;
            borrow = sub_limb(&mut un[i + j], (p & LOW_MASK) + borrow);
        }
        let negative = sub_limb(&mut un[j + n], carry + borrow) != 0;

        if negative {
            // Estimate was one too large: add the divisor back.
            qhat -= 1;
            let mut c = 0u64;
            for i in 0..n {
                let t = un[i + j] as u64 + vn[i] as u64 + c;
                un[i + j] = t as u32;
                c = t >> LIMB_BITS;
            }
            un[j + n] = un[j + n].wrapping_add(c as u32);
        }
        q[j] = qhat as u32;
    }

    let remainder = (0..n)
        .map(|i| {
            if shift == 0 {
                un[i]
            } else {
                (un[i] >> shift) | (un[i + 1] << (LIMB_BITS as u32 - shift))
            }
        })
        .collect();

    (
        BigInteger::from_le_limbs(q),
        BigInteger::from_le_limbs(remainder),
    )
}

/// Subtract `amount` (at most one limb base) from `slot`, returning the borrow.
fn sub_limb(slot: &mut u32, amount: u64) -> u64 {
    let cur = *slot as u64;
    if cur >= amount {
        *slot = (cur - amount) as u32;
        0
    } else {
        *slot = (cur + LIMB_BASE - amount) as u32;
        1
    }
}

/// Shift least-significant-first limbs left by `shift < 32` bits into a
/// buffer of `width` limbs.
fn shift_limbs_left(src: &[u32], shift: u32, width: usize) -> Vec<u32> {
    let mut out = vec![0u32; width];
    let mut carry = 0u32;
    for (i, &limb) in src.iter().enumerate() {
        if shift == 0 {
            out[i] = limb;
        } else {
            out[i] = (limb << shift) | carry;
            carry = limb >> (LIMB_BITS as u32 - shift);
        }
    }
    if src.len() < width {
        out[src.len()] = carry;
    }
    out
}
