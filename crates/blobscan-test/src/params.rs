//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use blobscan_core::Pix;
use blobscan_io::PnmFormat;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running check index, the mode and the
/// failures recorded so far.
pub struct RegParams {
    /// Name of the test (e.g., "label")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "label")
    ///
    /// # Returns
    ///
    /// A new `RegParams` instance configured from the `REGTEST_MODE`
    /// environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two numeric values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two images for exact equality of geometry and samples
    ///
    /// # Returns
    ///
    /// `true` if images are identical, `false` otherwise.
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) {
            self.fail(format!(
                "Failure in {}_reg: pix comparison for index {} - geometry mismatch \
                 ({}x{}x{} vs {}x{}x{})",
                self.test_name,
                self.index,
                pix1.width(),
                pix1.height(),
                pix1.channels(),
                pix2.width(),
                pix2.height(),
                pix2.channels()
            ));
            return false;
        }

        let mismatch = pix1
            .data()
            .iter()
            .zip(pix2.data())
            .position(|(a, b)| a != b);
        if let Some(i) = mismatch {
            let stride = pix1.stride() as usize;
            let x = (i % stride) / pix1.channels() as usize;
            let y = i / stride;
            self.fail(format!(
                "Failure in {}_reg: pix comparison for index {} - sample mismatch at ({}, {})",
                self.test_name, self.index, x, y
            ));
            return false;
        }

        true
    }

    /// Write an image as PNM and check it against its golden file
    ///
    /// In compare mode a missing golden file is a failure; run with
    /// `REGTEST_MODE=generate` to create it.
    ///
    /// # Errors
    ///
    /// Returns an error if the image or golden file cannot be written.
    pub fn write_pix_and_check(&mut self, pix: &Pix) -> TestResult<()> {
        self.index += 1;

        let ext = PnmFormat::for_pix(pix).extension();
        fs::create_dir_all(regout_dir())?;
        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        );

        blobscan_io::write_image(pix, &local_path).map_err(|e| TestError::ImageWrite {
            path: local_path.clone(),
            message: e.to_string(),
        })?;

        self.check_file(&local_path, ext)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden.
    /// In compare mode, compares byte-for-byte with the golden file, which
    /// must exist.
    /// In display mode, does nothing.
    fn check_file(&mut self, local_path: &str, ext: &str) -> TestResult<()> {
        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::create_dir_all(golden_dir())?;
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    self.fail(format!(
                        "Failure in {}_reg: golden file not found: {}",
                        self.test_name, golden_path
                    ));
                    return Ok(());
                }
                if fs::read(local_path)? != fs::read(&golden_path)? {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    ));
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Compare two byte strings
    ///
    /// # Returns
    ///
    /// `true` if data is identical, `false` otherwise.
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            self.fail(format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            ));
            false
        } else {
            true
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
