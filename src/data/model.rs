// ---------------------------------------------------------------------------
// Core dataset types
// ---------------------------------------------------------------------------

/// Node potentials shown in the viewer, in display order. phi3 is an
/// internal node of the circuit and is not exported by the simulator.
pub const SIGNAL_NAMES: [&str; 4] = ["phi1", "phi2", "phi4", "phi5"];

/// Waveforms from the transient simulator, one single-column file each.
#[derive(Debug, Clone, Default)]
pub struct BaselineDataset {
    pub t: Vec<f64>,
    pub phi1: Vec<f64>,
    pub phi2: Vec<f64>,
    pub phi4: Vec<f64>,
    pub phi5: Vec<f64>,
}

/// Waveforms from the external pa9 run, parsed out of one tabular file.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataset {
    pub t: Vec<f64>,
    pub phi1: Vec<f64>,
    pub phi2: Vec<f64>,
    pub phi4: Vec<f64>,
    pub phi5: Vec<f64>,
}

// ---------------------------------------------------------------------------
// SignalSet – the paired view the UI works with
// ---------------------------------------------------------------------------

/// One named signal with both of its curves.
#[derive(Debug, Clone)]
pub struct SignalEntry {
    pub name: &'static str,
    pub baseline: Vec<f64>,
    pub reference: Vec<f64>,
}

/// All four signal pairs plus the two time axes they are drawn against.
///
/// The two sides may have different lengths; the plot simply truncates the
/// shorter curve.
#[derive(Debug, Clone)]
pub struct SignalSet {
    pub baseline_t: Vec<f64>,
    pub reference_t: Vec<f64>,
    pub entries: Vec<SignalEntry>,
}

impl SignalSet {
    /// Pair up the two datasets signal by signal.
    pub fn pair(baseline: BaselineDataset, reference: ReferenceDataset) -> Self {
        let entries = vec![
            SignalEntry {
                name: SIGNAL_NAMES[0],
                baseline: baseline.phi1,
                reference: reference.phi1,
            },
            SignalEntry {
                name: SIGNAL_NAMES[1],
                baseline: baseline.phi2,
                reference: reference.phi2,
            },
            SignalEntry {
                name: SIGNAL_NAMES[2],
                baseline: baseline.phi4,
                reference: reference.phi4,
            },
            SignalEntry {
                name: SIGNAL_NAMES[3],
                baseline: baseline.phi5,
                reference: reference.phi5,
            },
        ];
        SignalSet {
            baseline_t: baseline.t,
            reference_t: reference.t,
            entries,
        }
    }

    /// Number of signal pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no signals.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_keeps_order_and_axes() {
        let baseline = BaselineDataset {
            t: vec![0.0, 1.0, 2.0],
            phi1: vec![1.0; 3],
            phi2: vec![2.0; 3],
            phi4: vec![4.0; 3],
            phi5: vec![5.0; 3],
        };
        let reference = ReferenceDataset {
            t: vec![0.5, 1.5],
            phi1: vec![10.0; 2],
            phi2: vec![20.0; 2],
            phi4: vec![40.0; 2],
            phi5: vec![50.0; 2],
        };

        let set = SignalSet::pair(baseline, reference);
        assert_eq!(set.len(), 4);
        assert!(!set.is_empty());
        assert_eq!(set.baseline_t, vec![0.0, 1.0, 2.0]);
        assert_eq!(set.reference_t, vec![0.5, 1.5]);

        assert_eq!(set.entries[0].name, "phi1");
        assert_eq!(set.entries[0].baseline, vec![1.0; 3]);
        assert_eq!(set.entries[0].reference, vec![10.0; 2]);

        assert_eq!(set.entries[2].name, "phi4");
        assert_eq!(set.entries[2].baseline, vec![4.0; 3]);
        assert_eq!(set.entries[3].reference, vec![50.0; 2]);
    }
}
