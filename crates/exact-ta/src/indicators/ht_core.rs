//! Shared state for the Hilbert-Transform cycle detector.
//!
//! The HT family (HT_PHASOR, HT_DCPHASE, MAMA) runs one serial kernel: a
//! 4-tap WMA price smoother feeding four Hilbert filter stages (detrender,
//! Q1, jI, jQ) that are split by bar parity, followed by a homodyne
//! discriminator that tracks the dominant cycle period. Every stage keeps a
//! 3-slot circular buffer per parity plus `prev`/`prev_input` carries, and
//! the 3-slot index advances only on even bars. The update order inside
//! each stage is the reference's and may not be rearranged.

use crate::traits::SeriesElement;

/// Warm-up consumed by the smoother plus the filter chain before the first
/// phasor (and MAMA) output.
pub(crate) const HT_LOOKBACK: usize = 32;

const A: f64 = 0.0962;
const B: f64 = 0.5769;

pub(crate) fn c<T: SeriesElement>(value: f64) -> T {
    // Safe unwrap: small literal constants are representable
    <T as num_traits::NumCast>::from(value).unwrap()
}

/// One parity half of a Hilbert filter stage.
#[derive(Debug, Clone, Copy)]
struct HilbertHalf<T> {
    buf: [T; 3],
    prev: T,
    prev_input: T,
}

impl<T: SeriesElement> HilbertHalf<T> {
    fn new() -> Self {
        Self {
            buf: [T::zero(); 3],
            prev: T::zero(),
            prev_input: T::zero(),
        }
    }

    fn run(&mut self, idx: usize, input: T, adjusted_period: T) -> T {
        let hilbert_temp = c::<T>(A) * input;
        let mut out = -self.buf[idx];
        self.buf[idx] = hilbert_temp;
        out = out + hilbert_temp;
        out = out - self.prev;
        self.prev = c::<T>(B) * self.prev_input;
        out = out + self.prev;
        self.prev_input = input;
        out * adjusted_period
    }
}

/// A Hilbert filter stage with separate even/odd halves.
#[derive(Debug, Clone, Copy)]
struct HilbertStage<T> {
    even: HilbertHalf<T>,
    odd: HilbertHalf<T>,
}

impl<T: SeriesElement> HilbertStage<T> {
    fn new() -> Self {
        Self {
            even: HilbertHalf::new(),
            odd: HilbertHalf::new(),
        }
    }

    fn run(&mut self, even_bar: bool, idx: usize, input: T, adjusted_period: T) -> T {
        if even_bar {
            self.even.run(idx, input, adjusted_period)
        } else {
            self.odd.run(idx, input, adjusted_period)
        }
    }
}

/// The 4-tap WMA price smoother (weights 4/3/2/1, scaled by 0.1).
#[derive(Debug, Clone, Copy)]
pub(crate) struct PriceSmoother<T> {
    period_wma_sub: T,
    period_wma_sum: T,
    trailing_idx: usize,
    trailing_value: T,
}

impl<T: SeriesElement> PriceSmoother<T> {
    /// Primes the smoother with the first three bars and returns the next
    /// index to consume.
    pub(crate) fn prime(data: &[T]) -> (Self, usize) {
        let mut today = 0;

        let mut temp = data[today];
        today += 1;
        let mut period_wma_sub = temp;
        let mut period_wma_sum = temp;
        temp = data[today];
        today += 1;
        period_wma_sub = period_wma_sub + temp;
        period_wma_sum = period_wma_sum + temp * T::two();
        temp = data[today];
        today += 1;
        period_wma_sub = period_wma_sub + temp;
        period_wma_sum = period_wma_sum + temp * c(3.0);

        (
            Self {
                period_wma_sub,
                period_wma_sum,
                trailing_idx: 0,
                trailing_value: T::zero(),
            },
            today,
        )
    }

    /// Folds the bar at `*today` into the smoother and returns the
    /// smoothed value, advancing `*today`.
    pub(crate) fn update(&mut self, data: &[T], today: &mut usize) -> T {
        let value = data[*today];
        *today += 1;
        self.period_wma_sub = self.period_wma_sub + value;
        self.period_wma_sub = self.period_wma_sub - self.trailing_value;
        self.period_wma_sum = self.period_wma_sum + value * c(4.0);
        self.trailing_value = data[self.trailing_idx];
        self.trailing_idx += 1;
        let smoothed = self.period_wma_sum * c(0.1);
        self.period_wma_sum = self.period_wma_sum - self.period_wma_sub;
        smoothed
    }
}

/// Per-bar outputs of the filter chain.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HtBar<T> {
    /// Quadrature component for this bar.
    pub q1: T,
    /// In-phase component (the detrender delayed three bars of the same
    /// parity).
    pub i1_prev3: T,
}

/// The full homodyne discriminator state.
#[derive(Debug, Clone)]
pub(crate) struct HtState<T> {
    detrender: HilbertStage<T>,
    q1: HilbertStage<T>,
    ji: HilbertStage<T>,
    jq: HilbertStage<T>,
    hilbert_idx: usize,

    i1_for_odd_prev2: T,
    i1_for_odd_prev3: T,
    i1_for_even_prev2: T,
    i1_for_even_prev3: T,

    prev_i2: T,
    prev_q2: T,
    re: T,
    im: T,
    period: T,
}

impl<T: SeriesElement> HtState<T> {
    pub(crate) fn new() -> Self {
        Self {
            detrender: HilbertStage::new(),
            q1: HilbertStage::new(),
            ji: HilbertStage::new(),
            jq: HilbertStage::new(),
            hilbert_idx: 0,
            i1_for_odd_prev2: T::zero(),
            i1_for_odd_prev3: T::zero(),
            i1_for_even_prev2: T::zero(),
            i1_for_even_prev3: T::zero(),
            prev_i2: T::zero(),
            prev_q2: T::zero(),
            re: T::zero(),
            im: T::zero(),
            period: T::zero(),
        }
    }

    /// Dominant cycle period after the latest [`advance`](Self::advance).
    pub(crate) fn period(&self) -> T {
        self.period
    }

    /// Adjusted period factor for the CURRENT bar; callers needing it must
    /// read it before advancing.
    pub(crate) fn adjusted_prev_period(&self) -> T {
        c::<T>(0.075) * self.period + c(0.54)
    }

    /// Runs one bar through the filter chain and the homodyne period
    /// update. `even_bar` is `today % 2 == 0` against the absolute input
    /// index.
    pub(crate) fn advance(&mut self, smoothed: T, even_bar: bool) -> HtBar<T> {
        let adjusted = self.adjusted_prev_period();
        let idx = self.hilbert_idx;

        let detrender = self.detrender.run(even_bar, idx, smoothed, adjusted);
        let q1 = self.q1.run(even_bar, idx, detrender, adjusted);

        let i1_prev3 = if even_bar {
            self.i1_for_even_prev3
        } else {
            self.i1_for_odd_prev3
        };

        let ji = self.ji.run(even_bar, idx, i1_prev3, adjusted);
        let jq = self.jq.run(even_bar, idx, q1, adjusted);

        if even_bar {
            self.hilbert_idx += 1;
            if self.hilbert_idx == 3 {
                self.hilbert_idx = 0;
            }
        }

        let point_two = c::<T>(0.2);
        let point_eight = c::<T>(0.8);
        let q2 = point_two * (q1 + ji) + point_eight * self.prev_q2;
        let i2 = point_two * (i1_prev3 - jq) + point_eight * self.prev_i2;

        if even_bar {
            self.i1_for_odd_prev3 = self.i1_for_odd_prev2;
            self.i1_for_odd_prev2 = detrender;
        } else {
            self.i1_for_even_prev3 = self.i1_for_even_prev2;
            self.i1_for_even_prev2 = detrender;
        }

        self.re = point_two * (i2 * self.prev_i2 + q2 * self.prev_q2) + point_eight * self.re;
        self.im = point_two * (i2 * self.prev_q2 - q2 * self.prev_i2) + point_eight * self.im;
        self.prev_q2 = q2;
        self.prev_i2 = i2;

        let rad2deg = c::<T>(180.0 / std::f64::consts::PI);
        let prev_period = self.period;
        if self.im != T::zero() && self.re != T::zero() {
            self.period = c::<T>(360.0) / ((self.im / self.re).atan() * rad2deg);
        }
        let upper = c::<T>(1.5) * prev_period;
        if self.period > upper {
            self.period = upper;
        }
        let lower = c::<T>(0.67) * prev_period;
        if self.period < lower {
            self.period = lower;
        }
        if self.period < c(6.0) {
            self.period = c(6.0);
        } else if self.period > c(50.0) {
            self.period = c(50.0);
        }
        self.period = point_two * self.period + point_eight * prev_period;

        HtBar { q1, i1_prev3 }
    }
}
