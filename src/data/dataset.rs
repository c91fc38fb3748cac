//! Embedded sample dataset: camera exposure (s), ISO and aperture (f-number)
//! of a photo collection. Follows the convention where y(x, z) is elevation.

use super::rows::{Row, RowSet};

pub const SAMPLE_ROWS: [Row; 100] = [
    Row::new(0.000271002710027, 64.0, 2.40000000834),
    Row::new(0.05, 80.0, 2.40000026239),
    Row::new(0.002, 400.0, 14.0000278121),
    Row::new(0.003125, 125.0, 4.0),
    Row::new(0.0138888888889, 80.0, 2.60268371088),
    Row::new(0.000679347826087, 80.0, 2.60268371088),
    Row::new(0.0769230769231, 1250.0, 3.50000000902),
    Row::new(0.05, 160.0, 2.40000026239),
    Row::new(0.0666666666667, 125.0, 2.60268371088),
    Row::new(0.0666666666667, 80.0, 2.40000000834),
    Row::new(0.05, 80.0, 2.40000000834),
    Row::new(0.00392156862745, 80.0, 2.60268371088),
    Row::new(0.004, 1250.0, 2.80000000407),
    Row::new(0.00413223140496, 80.0, 2.79999992195),
    Row::new(0.00833333333333, 125.0, 2.79999992195),
    Row::new(0.004, 400.0, 3.19999592595),
    Row::new(0.0666666666667, 125.0, 2.20381023175),
    Row::new(0.1, 800.0, 2.82842712475),
    Row::new(0.025, 100.0, 2.79999992195),
    Row::new(0.0666666666667, 80.0, 2.79999992195),
    Row::new(0.0222222222222, 240.0, 3.29436406907),
    Row::new(0.008, 640.0, 3.20000021047),
    Row::new(0.000533333333333, 80.0, 2.79999992195),
    Row::new(0.00719424460432, 32.0, 2.64817782079),
    Row::new(0.02, 200.0, 3.18628430268),
    Row::new(0.0416666666667, 64.0, 2.40000000834),
    Row::new(0.030303030303, 250.0, 2.60268371088),
    Row::new(0.0222222222222, 240.0, 3.29436406907),
    Row::new(0.0125, 500.0, 4.0),
    Row::new(0.005, 100.0, 7.10000258004),
    Row::new(0.000379794910748, 80.0, 2.79999992195),
    Row::new(0.166666666667, 100.0, 3.51250432075),
    Row::new(0.0333333333333, 400.0, 2.70851109387),
    Row::new(0.02, 125.0, 3.18628430268),
    Row::new(0.01, 400.0, 4.99999967115),
    Row::new(0.05, 1000.0, 1.40000016772),
    Row::new(0.024999, 400.0, 2.0),
    Row::new(0.0333333333333, 400.0, 2.98581545658),
    Row::new(0.0666666666667, 125.0, 2.79999992195),
    Row::new(0.008, 200.0, 4.99332219561),
    Row::new(0.0666666666667, 640.0, 2.20381023175),
    Row::new(0.0666666666667, 400.0, 2.79999992195),
    Row::new(0.025, 320.0, 3.50000018909),
    Row::new(0.0002, 320.0, 2.80000033543),
    Row::new(0.004, 1250.0, 1.40000016772),
    Row::new(0.008, 200.0, 8.0),
    Row::new(0.8, 100.0, 9.99999934229),
    Row::new(0.0015625, 80.0, 4.0),
    Row::new(0.0166666666667, 3200.0, 4.0),
    Row::new(0.0333333333333, 100.0, 3.36358566101),
    Row::new(0.0125, 200.0, 3.50000018909),
    Row::new(0.02, 800.0, 2.0),
    Row::new(0.05, 400.0, 2.40000000834),
    Row::new(0.00833333333333, 80.0, 2.40000000834),
    Row::new(0.005, 200.0, 4.99999992043),
    Row::new(0.05, 800.0, 2.79795934508),
    Row::new(0.000833, 102.0, 2.0),
    Row::new(0.25, 200.0, 2.79795934508),
    Row::new(0.025, 50.0, 2.60268371088),
    Row::new(0.00125, 500.0, 3.50000018909),
    Row::new(0.005, 400.0, 10.0000127314),
    Row::new(0.0666666666667, 500.0, 2.79999992195),
    Row::new(0.05, 1600.0, 2.49999983557),
    Row::new(0.0166666666667, 320.0, 2.80000033543),
    Row::new(0.00125, 160.0, 4.50608647443),
    Row::new(0.0166666666667, 64.0, 2.64817782079),
    Row::new(0.00833333333333, 100.0, 2.40000026239),
    Row::new(0.0025, 200.0, 4.99999967115),
    Row::new(0.125, 50.0, 5.59999998979),
    Row::new(0.0166666666667, 160.0, 2.70851109387),
    Row::new(0.0004, 80.0, 2.79999992195),
    Row::new(0.05, 160.0, 2.64817782079),
    Row::new(0.0666666666667, 800.0, 2.40000000834),
    Row::new(0.0666, 800.0, 2.0),
    Row::new(0.2, 1600.0, 2.0),
    Row::new(0.05, 160.0, 2.40000000834),
    Row::new(0.04, 800.0, 2.0),
    Row::new(0.0125, 400.0, 4.49999940919),
    Row::new(0.0666666666667, 1000.0, 2.79999992195),
    Row::new(0.00625, 80.0, 8.0),
    Row::new(0.0025974025974, 80.0, 2.79999992195),
    Row::new(0.008, 100.0, 8.0),
    Row::new(0.000905797101449, 64.0, 2.40000000834),
    Row::new(0.000424088210348, 50.0, 2.40000000834),
    Row::new(0.00238095238095, 64.0, 2.80014201832),
    Row::new(0.0588235294118, 250.0, 2.79999992195),
    Row::new(0.0333333333333, 800.0, 3.36358566101),
    Row::new(0.002, 160.0, 4.50608647443),
    Row::new(0.0416666666667, 125.0, 2.60268371088),
    Row::new(1.0, 400.0, 16.0),
    Row::new(0.005, 160.0, 9.01217294887),
    Row::new(0.0666666666667, 199.0, 2.80000033543),
    Row::new(0.0166666666667, 100.0, 3.09942372384),
    Row::new(0.00151975683891, 50.0, 2.20381023175),
    Row::new(0.0666666666667, 800.0, 2.40000000834),
    Row::new(0.00625, 100.0, 4.4999999955),
    Row::new(0.005, 400.0, 8.0),
    Row::new(0.0666666666667, 100.0, 2.40000000834),
    Row::new(0.0125, 800.0, 2.80000033543),
    Row::new(0.0666666666667, 500.0, 2.46228882669),
];

/// The embedded rows as a fresh [`RowSet`].
pub fn sample_rows() -> RowSet {
    SAMPLE_ROWS.iter().copied().collect()
}
