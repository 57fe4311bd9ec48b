//! Axis ranges, ticks and the data-to-canvas mapping.

/// Value mapping of an [`Axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    /// Decades; non-positive values map to the axis minimum.
    Log,
}

/// Labelled major tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub scale: Scale,
    pub label: String,
    pub ticks: Vec<Tick>,
    pub minor_ticks: Vec<f64>,
}

impl Axis {
    /// Linear axis widened outwards to whole tick steps.
    pub fn auto_linear(data_min: f64, data_max: f64, target_ticks: usize) -> Self {
        let span = data_max - data_min;
        if !span.is_finite() || span.abs() < 1e-15 {
            return Self::stepped(data_min - 1.0, data_min + 1.0, 1.0);
        }
        let step = nice_step(span / (target_ticks.max(2) - 1) as f64);
        Self::stepped((data_min / step).floor() * step, (data_max / step).ceil() * step, step)
    }

    /// Linear axis over exactly `[min, max]`; ticks fall on whole steps inside
    /// it. Observables with a physical range (`[-π, π]`, `[0, 1]`) use this.
    pub fn fixed_linear(min: f64, max: f64, target_ticks: usize) -> Self {
        if !(max > min) {
            return Self::auto_linear(min, max, target_ticks);
        }
        let step = nice_step((max - min) / (target_ticks.max(2) - 1) as f64);
        let first = (min / step).ceil() * step;
        let last = (max / step).floor() * step;
        Self { min, max, ..Self::stepped(first, last, step) }
    }

    /// Ticks every `step` from `first` to `last`, with four minor ticks
    /// between majors and one step of minors past either end.
    fn stepped(first: f64, last: f64, step: f64) -> Self {
        let n = ((last - first) / step + 1e-6).floor().max(0.0) as i64;
        let ticks = (0..=n)
            .map(|i| {
                let value = first + i as f64 * step;
                Tick { value, label: linear_label(value, step) }
            })
            .collect();
        let minor_ticks = (-5..=5 * n + 5)
            .filter(|i| i % 5 != 0)
            .map(|i| first + i as f64 * step / 5.0)
            .collect();
        Self {
            min: first,
            max: last,
            scale: Scale::Linear,
            label: String::new(),
            ticks,
            minor_ticks,
        }
    }

    /// Log axis over whole decades enclosing `[data_min, data_max]`.
    ///
    /// A non-positive `data_min` (empty bins) is replaced by `data_max / 100`.
    pub fn auto_log(data_min: f64, data_max: f64) -> Self {
        let hi = if data_max > 0.0 { data_max } else { 1.0 };
        let lo = if data_min > 0.0 && data_min < hi { data_min } else { hi / 100.0 };
        let first = lo.log10().floor() as i32;
        let last = (hi.log10().ceil() as i32).max(first + 1);

        let ticks = (first..=last)
            .map(|e| Tick { value: 10f64.powi(e), label: format!("10{}", superscript(e)) })
            .collect();
        let minor_ticks = (first..last)
            .flat_map(|e| (2..=9).map(move |m| f64::from(m) * 10f64.powi(e)))
            .collect();
        Self {
            min: 10f64.powi(first),
            max: 10f64.powi(last),
            scale: Scale::Log,
            label: String::new(),
            ticks,
            minor_ticks,
        }
    }

    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self { label: label.into(), ..self }
    }

    /// Position of `value` between `px_min` (axis minimum) and `px_max`.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = match self.scale {
            Scale::Linear => (value - self.min) / (self.max - self.min),
            Scale::Log => {
                let v = if value > 0.0 { value } else { self.min };
                (v / self.min).log10() / (self.max / self.min).log10()
            }
        };
        px_min + frac * (px_max - px_min)
    }
}

/// Round a rough step to 1, 2 or 5 times a power of ten.
fn nice_step(rough: f64) -> f64 {
    let magnitude = 10f64.powf(rough.abs().log10().floor());
    let mantissa = rough / magnitude;
    let nice = match mantissa {
        m if m <= 1.5 => 1.0,
        m if m <= 3.5 => 2.0,
        m if m <= 7.5 => 5.0,
        _ => 10.0,
    };
    nice * magnitude
}

/// As many decimals as the step needs; never prints `-0`.
fn linear_label(value: f64, step: f64) -> String {
    let v = if value.abs() < step * 1e-6 { 0.0 } else { value };
    if step >= 1.0 {
        format!("{}", v.round() as i64)
    } else {
        let decimals = (-step.log10().floor()) as usize;
        format!("{v:.decimals$}")
    }
}

fn superscript(n: i32) -> String {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => DIGITS[d as usize],
            None => '⁻',
        })
        .collect()
}
