use log::{Level, LevelFilter, Log, Metadata, Record};
use seqalign_core::{AlignmentMatrix, FillStrategy, ScoringScheme, Sequence};
use std::sync::atomic::AtomicBool;
use std::sync::Mutex;

struct CollectingLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CollectingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) && record.target().starts_with("seqalign_core") {
            self.lines.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOGGER: CollectingLogger = CollectingLogger {
    lines: Mutex::new(Vec::new()),
};

fn take_lines() -> Vec<String> {
    std::mem::take(&mut *LOGGER.lines.lock().unwrap())
}

fn matrix() -> AlignmentMatrix {
    AlignmentMatrix::new(
        Sequence::from_text("a", "GATTACA").unwrap(),
        Sequence::from_text("b", "GCATGCU").unwrap(),
        ScoringScheme::unit(),
    )
    .unwrap()
}

// One test per binary: the logger is process-global
#[test]
fn every_fill_entry_point_logs_start_and_end() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Debug);

    for strategy in [FillStrategy::Sequential, FillStrategy::AntiDiagonal] {
        let mut m = matrix();
        take_lines();
        m.fill_with(strategy).unwrap();
        let lines = take_lines();
        assert!(lines.iter().any(|l| l.starts_with("Filling 8 x 8 alignment matrix")));
        assert!(lines.iter().any(|l| l == "Matrix filled, terminal score 0"));
    }

    let mut m = matrix();
    take_lines();
    m.fill_cancellable(&AtomicBool::new(false)).unwrap();
    let lines = take_lines();
    assert!(lines
        .iter()
        .any(|l| l.starts_with("Filling 8 x 8 alignment matrix") && l.contains("cancellable")));
    assert!(lines.iter().any(|l| l == "Matrix filled, terminal score 0"));
}
