// @generated by treescore-compile from scaler_params.json and xgb_model.json.
// Do not edit by hand; regenerate from the exported model instead.

use crate::transform::OutputTransform;

pub const N_FEATURES: usize = 15;

pub const MEAN: [f64; N_FEATURES] = [
    21.84,
    45.3,
    612.5,
    118.2,
    9.75,
    0.42,
    1013.6,
    3.15,
    152.0,
    27.4,
    0.88,
    14.2,
    6.05,
    250.3,
    0.31,
];

pub const SCALE: [f64; N_FEATURES] = [
    3.12,
    11.8,
    184.25,
    45.6,
    2.9,
    0.21,
    6.85,
    1.44,
    61.5,
    9.3,
    0.35,
    4.75,
    2.2,
    97.4,
    0.18,
];

pub const TRANSFORM: OutputTransform = OutputTransform::Sigmoid;

pub const N_TREES: usize = 5;

fn tree_0(x: &[f64; N_FEATURES]) -> f64 {
    if x[2] < 0.43 {
        if x[0] < -0.25 {
            -0.182
        } else {
            -0.061
        }
    } else {
        if x[4] < 1.12 {
            0.094
        } else {
            0.213
        }
    }
}

fn tree_1(x: &[f64; N_FEATURES]) -> f64 {
    if x[3] < -0.5 {
        -0.147
    } else {
        if x[9] < 0.75 {
            if x[1] < 0.1 {
                0.018
            } else {
                0.071
            }
        } else {
            0.166
        }
    }
}

fn tree_2(x: &[f64; N_FEATURES]) -> f64 {
    if x[6] < 0.2 {
        if x[12] < -1.05 {
            -0.129
        } else {
            0.012
        }
    } else {
        if x[2] < 1.5 {
            0.058
        } else {
            0.141
        }
    }
}

fn tree_3(x: &[f64; N_FEATURES]) -> f64 {
    if x[14] < 0.65 {
        if x[7] < -0.3 {
            -0.088
        } else {
            if x[11] < 0.9 {
                -0.007
            } else {
                0.052
            }
        }
    } else {
        0.104
    }
}

fn tree_4(x: &[f64; N_FEATURES]) -> f64 {
    if x[5] < -0.8 {
        -0.093
    } else {
        if x[13] < 0.35 {
            0.021
        } else {
            if x[8] < 1.25 {
                0.047
            } else {
                0.118
            }
        }
    }
}

pub fn margin(x: &[f64; N_FEATURES]) -> f64 {
    let mut score = 0.0;
    score += tree_0(x);
    score += tree_1(x);
    score += tree_2(x);
    score += tree_3(x);
    score += tree_4(x);
    score
}
