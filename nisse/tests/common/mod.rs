#![allow(dead_code)]

use nisse::config::ProfileKey;
use nisse::hid::KEYBOARD_REPORT_SIZE;
use nisse::keyboard::{HostLink, KeyboardEngine, LedDriver, ModuleInfo, Transmission};
use nisse::matrix::MatrixReader;
use nisse::profile::{ProfilePage, ProfileStore};
use nisse::{KeyCode, LedIndicator, MATRIX_ROWS};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub type Report = [u8; KEYBOARD_REPORT_SIZE];

/// Matrix whose keys are set directly by the test
#[derive(Debug, Default)]
pub struct FakeMatrix {
    pub rows: [u16; MATRIX_ROWS],
}

impl FakeMatrix {
    pub fn press(&mut self, row: usize, col: usize) {
        self.rows[row] |= 1 << col;
    }

    pub fn release(&mut self, row: usize, col: usize) {
        self.rows[row] &= !(1 << col);
    }
}

impl MatrixReader for FakeMatrix {
    fn read_row(&mut self, row: usize) -> u16 {
        self.rows[row]
    }
}

#[derive(Debug, Default)]
pub struct MemoryLeds {
    pub last: Option<LedIndicator>,
    pub updates: usize,
}

impl LedDriver for MemoryLeds {
    fn set_indicators(&mut self, leds: LedIndicator) {
        self.last = Some(leds);
        self.updates += 1;
    }
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub passkey_entry: bool,
    pub bonding_cleared: usize,
    pub module: Option<ModuleInfo>,
    pub touch_pad: bool,
}

impl HostLink for FakeHost {
    fn is_passkey_entry(&self) -> bool {
        self.passkey_entry
    }

    fn clear_bonding(&mut self) {
        self.bonding_cleared += 1;
    }

    fn module_info(&self) -> Option<ModuleInfo> {
        self.module
    }

    fn has_touch_pad(&self) -> bool {
        self.touch_pad
    }
}

pub type TestEngine = KeyboardEngine<FakeMatrix, ProfilePage, FakeHost, MemoryLeds>;

/// Engine with the given settings, host LEDs off
pub fn engine_with(settings: &[(ProfileKey, u8)]) -> TestEngine {
    let mut page = ProfilePage::new();
    for &(key, value) in settings {
        page.write(key, value);
    }
    let mut engine = KeyboardEngine::new(FakeMatrix::default(), page, FakeHost::default(), MemoryLeds::default());
    engine.set_leds(LedIndicator::new());
    engine
}

pub fn engine() -> TestEngine {
    engine_with(&[])
}

/// Run one polling tick and collect the keyboard report
pub fn tick(engine: &mut TestEngine) -> Option<Report> {
    engine.task();
    engine.keyboard_report().map(|r| r.to_bytes())
}

/// Keep ticking while queued keys are being typed
pub fn run_until_idle(engine: &mut TestEngine) -> Vec<Report> {
    let mut reports = Vec::new();
    for _ in 0..4096 {
        if !engine.transmission().is_typing() {
            break;
        }
        reports.extend(tick(engine));
    }
    reports
}

/// Press keys and tick until they are debounced and anything they queued is typed
pub fn hold(engine: &mut TestEngine, keys: &[(usize, usize)]) -> Vec<Report> {
    for &(row, col) in keys {
        engine.reader_mut().press(row, col);
    }
    settle(engine)
}

/// Release keys and tick until they are debounced
pub fn release(engine: &mut TestEngine, keys: &[(usize, usize)]) -> Vec<Report> {
    for &(row, col) in keys {
        engine.reader_mut().release(row, col);
    }
    settle(engine)
}

pub fn tap(engine: &mut TestEngine, keys: &[(usize, usize)]) -> Vec<Report> {
    let mut reports = hold(engine, keys);
    reports.extend(release(engine, keys));
    reports
}

fn settle(engine: &mut TestEngine) -> Vec<Report> {
    let mut reports = Vec::new();
    for _ in 0..2 {
        reports.extend(tick(engine));
    }
    reports.extend(run_until_idle(engine));
    reports
}

/// Keys as the host sees them go down, in order
pub fn typed(reports: &[Report]) -> Vec<KeyCode> {
    let mut keys = Vec::new();
    let mut prev = 0;
    for report in reports {
        if report[2] != 0 && report[2] != prev {
            keys.push(KeyCode::from(report[2]));
        }
        prev = report[2];
    }
    keys
}

/// Keys typed for an ASCII string
pub fn keys_of(s: &str) -> Vec<KeyCode> {
    s.bytes().filter_map(KeyCode::from_ascii).collect()
}

pub fn report(modifier: u8, keys: &[KeyCode]) -> Report {
    let mut bytes = [0; KEYBOARD_REPORT_SIZE];
    bytes[0] = modifier;
    for (slot, key) in bytes[2..].iter_mut().zip(keys) {
        *slot = *key as u8;
    }
    bytes
}
