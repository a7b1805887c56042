/// Scalar random source consumed by the `ran` instruction.
///
/// The interpreter reseeds the source from the run's seed before the first
/// instruction, so two runs with the same seed see the same sequence. Values
/// must fall in `[0, 1]` and be finite.
pub trait RngSource {
    fn reseed(&mut self, seed: i64);
    fn next(&mut self) -> f64;
}

const IM1: i64 = 2_147_483_563;
const IM2: i64 = 2_147_483_399;
const AM: f64 = 1.0 / IM1 as f64;
const IMM1: i64 = IM1 - 1;
const IA1: i64 = 40014;
const IA2: i64 = 40692;
const IQ1: i64 = 53668;
const IQ2: i64 = 52774;
const IR1: i64 = 12211;
const IR2: i64 = 3791;
const NTAB: usize = 32;
const NDIV: i64 = 1 + IMM1 / NTAB as i64;
const EPS: f64 = 1.2e-7;
const RNMX: f64 = 1.0 - EPS;

/// The long-period "ran2" generator of Press et al. (Numerical Recipes):
/// two L'Ecuyer multiplicative streams combined through a 32-entry shuffle
/// table. Period is ~2*10^18 and the output never returns the endpoint
/// values 0.0 or 1.0.
///
/// Kept as the stock source for bit-for-bit compatibility with historical
/// Slash/A runs, which seed it with a negative value. The whole generator
/// state lives in the instance, so cores running in parallel do not share
/// sequences.
pub struct Ran2 {
    idum: i64,
    idum2: i64,
    iy: i64,
    iv: [i64; NTAB],
}

impl Ran2 {
    pub fn new(seed: i64) -> Ran2 {
        let mut rng = Ran2 {
            idum: 0,
            idum2: 123_456_789,
            iy: 0,
            iv: [0; NTAB],
        };
        rng.reseed(seed);
        rng
    }

    // A non-positive idum triggers this on the next draw.
    fn initialize(&mut self) {
        self.idum = if -self.idum < 1 { 1 } else { -self.idum };
        self.idum2 = self.idum;
        for j in (0..NTAB + 8).rev() {
            let k = self.idum / IQ1;
            self.idum = IA1 * (self.idum - k * IQ1) - k * IR1;
            if self.idum < 0 {
                self.idum += IM1;
            }
            if j < NTAB {
                self.iv[j] = self.idum;
            }
        }
        self.iy = self.iv[0];
    }
}

impl RngSource for Ran2 {
    fn reseed(&mut self, seed: i64) {
        self.idum = seed;
        self.idum2 = 123_456_789;
        self.iy = 0;
        self.iv = [0; NTAB];
    }

    fn next(&mut self) -> f64 {
        if self.idum <= 0 {
            self.initialize();
        }

        let k = self.idum / IQ1;
        self.idum = IA1 * (self.idum - k * IQ1) - k * IR1;
        if self.idum < 0 {
            self.idum += IM1;
        }

        let k = self.idum2 / IQ2;
        self.idum2 = IA2 * (self.idum2 - k * IQ2) - k * IR2;
        if self.idum2 < 0 {
            self.idum2 += IM2;
        }

        let j = (self.iy / NDIV) as usize;
        self.iy = self.iv[j] - self.idum2;
        self.iv[j] = self.idum;
        if self.iy < 1 {
            self.iy += IMM1;
        }

        let temp = AM * self.iy as f64;
        if temp > RNMX {
            RNMX
        } else {
            temp
        }
    }
}
