//! Writes a synthetic monthly sunspot file in the `Year;Month;Date;...` layout.

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Smooth solar-cycle envelope: an 11-year half-sine whose peak drifts slowly.
fn cycle_activity(date: f64) -> f64 {
    let phase = (date - 1755.0).rem_euclid(11.0) / 11.0;
    let amplitude = 120.0 + 60.0 * (2.0 * std::f64::consts::PI * (date - 1749.0) / 90.0).sin();
    amplitude * (std::f64::consts::PI * phase).sin().powi(2)
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_sunspots.csv";

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(output_path)?;

    let (first_year, last_year) = (1749, 2024);
    let mut rows = 0usize;
    for year in first_year..=last_year {
        for month in 1..=12u32 {
            let date = year as f64 + (month as f64 - 0.5) / 12.0;
            let mean = (cycle_activity(date) + rng.gauss(0.0, 15.0)).max(0.0);

            // Daily statistics only exist from 1818 onwards.
            let (std_dev, observations) = if year >= 1818 {
                (rng.gauss(8.0, 2.0).abs(), (rng.next_f64() * 900.0) as i64 + 30)
            } else {
                (-1.0, -1)
            };
            let marker = if year == last_year { "0" } else { "1" };

            writer.write_record([
                year.to_string(),
                format!("{month:02}"),
                format!("{date:.3}"),
                format!("{mean:6.1}"),
                format!("{std_dev:5.1}"),
                format!("{observations:5}"),
                marker.to_string(),
            ])?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!("Wrote {rows} monthly records ({first_year}–{last_year}) to {output_path}");
    Ok(())
}
