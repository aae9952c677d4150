use once_cell::sync::Lazy;

/// A named pair of equal-length sequences, `xs[i]` paired with `ys[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    pub name: String,
    pub x_label: String,
    pub y_label: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl SampleSeries {
    pub fn new(
        name: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        xs: Vec<f64>,
        ys: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            xs,
            ys,
        }
    }

    pub fn title(&self) -> String {
        format!("Set {}", self.name)
    }

    /// `set_<name>.png`, anything but ascii alphanumerics, `-` and `_` replaced by `_`.
    pub fn file_name(&self) -> String {
        let stem: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("set_{}.png", stem)
    }
}

const SHARED_XS: [f64; 11] = [10., 8., 13., 9., 11., 14., 6., 4., 12., 7., 5.];

static QUARTET: Lazy<Vec<SampleSeries>> = Lazy::new(|| {
    vec![
        SampleSeries::new(
            "I",
            "X1",
            "Y1",
            SHARED_XS.to_vec(),
            vec![8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68],
        ),
        SampleSeries::new(
            "II",
            "X2",
            "Y2",
            SHARED_XS.to_vec(),
            vec![9.14, 8.14, 8.74, 8.77, 9.26, 8.1, 6.13, 3.1, 9.13, 7.26, 4.74],
        ),
        SampleSeries::new(
            "III",
            "X3",
            "Y3",
            SHARED_XS.to_vec(),
            vec![7.46, 6.77, 12.74, 7.11, 7.81, 8.84, 6.08, 5.39, 8.15, 6.42, 5.73],
        ),
        SampleSeries::new(
            "IV",
            "X4",
            "Y4",
            vec![8., 8., 8., 8., 8., 8., 8., 19., 8., 8., 8.],
            vec![6.58, 5.76, 7.71, 8.84, 8.47, 7.04, 5.25, 12.5, 5.56, 7.91, 6.89],
        ),
    ]
});

/// The Anscombe quartet, in order I to IV.
pub fn quartet() -> &'static [SampleSeries] {
    &QUARTET
}
