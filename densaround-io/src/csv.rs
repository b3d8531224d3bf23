use std::io::Write;

use densaround_histogram::{BinOffset, DensityHistogram, HistogramRow};

use crate::consts::FLOAT_PRECISION;
use crate::error::Result;
use crate::output::{OutputFile, StagedOutput, persist_all};

fn format_distance(row: &HistogramRow) -> String {
    match row.offset {
        BinOffset::Overlap => "0".to_string(),
        _ => format!("{:.*}", FLOAT_PRECISION, row.distance),
    }
}

pub trait HistogramWrite {
    ///
    /// Write `distance,count` rows, adding an `occupancy` column when
    /// `with_occupancy` is set and a denominator exists.
    ///
    /// # Arguments
    /// - out: destination
    /// - with_occupancy: append the denominator as a third column
    fn write_counts<W: Write>(&self, out: &mut W, with_occupancy: bool) -> Result<()>;

    ///
    /// Write `distance,occupancy` rows; writes nothing without a denominator.
    ///
    fn write_occupancy<W: Write>(&self, out: &mut W) -> Result<()>;

    ///
    /// Write the histogram to `path` (`-` for stdout) without persisting it.
    /// When `occupancy_path` is given the denominator goes there, otherwise
    /// it is a third column of the main output.
    ///
    fn stage_csv(&self, path: &str, occupancy_path: Option<&str>) -> Result<Vec<StagedOutput>>;

    ///
    /// Stage and persist the outputs of [`HistogramWrite::stage_csv`].
    /// Nothing is persisted unless every output was written successfully.
    ///
    fn write_csv(&self, path: &str, occupancy_path: Option<&str>) -> Result<()> {
        persist_all(self.stage_csv(path, occupancy_path)?)
    }
}

impl HistogramWrite for DensityHistogram {
    fn write_counts<W: Write>(&self, out: &mut W, with_occupancy: bool) -> Result<()> {
        for row in self.rows() {
            match row.occupancy.filter(|_| with_occupancy) {
                Some(occupancy) => writeln!(
                    out,
                    "{},{},{:.*}",
                    format_distance(&row),
                    row.count,
                    FLOAT_PRECISION,
                    occupancy
                )?,
                None => writeln!(out, "{},{}", format_distance(&row), row.count)?,
            }
        }
        Ok(())
    }

    fn write_occupancy<W: Write>(&self, out: &mut W) -> Result<()> {
        for row in self.rows() {
            if let Some(occupancy) = row.occupancy {
                writeln!(
                    out,
                    "{},{:.*}",
                    format_distance(&row),
                    FLOAT_PRECISION,
                    occupancy
                )?;
            }
        }
        Ok(())
    }

    fn stage_csv(&self, path: &str, occupancy_path: Option<&str>) -> Result<Vec<StagedOutput>> {
        let mut counts = OutputFile::create(path)?;
        self.write_counts(&mut counts, occupancy_path.is_none())?;
        let mut staged = vec![counts.stage()?];

        if let Some(occupancy_path) = occupancy_path.filter(|_| self.has_denominator()) {
            let mut occupancy = OutputFile::create(occupancy_path)?;
            self.write_occupancy(&mut occupancy)?;
            staged.push(occupancy.stage()?);
        }

        Ok(staged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use densaround_core::models::{Event, Object};
    use densaround_histogram::{EventStore, HistogramConfig, ObjectSweeper};
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn events() -> EventStore {
        [85, 95, 100, 112].into_iter().map(Event::point).collect()
    }

    fn run(config: HistogramConfig, events: &EventStore) -> DensityHistogram {
        let mut sweeper = ObjectSweeper::new(config, events);
        sweeper.sweep_object(&Object::new(100, 100).unwrap());
        sweeper.finish()
    }

    #[rstest]
    fn test_write_counts(events: EventStore) {
        let histogram = run(HistogramConfig::new(10, 2).unwrap(), &events);

        let mut out = Vec::new();
        histogram.write_counts(&mut out, true).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "-15.000000,1\n-5.000000,1\n0,1\n5.000000,0\n15.000000,1\n"
        );
    }

    #[rstest]
    fn test_write_counts_with_occupancy(events: EventStore) {
        let config = HistogramConfig::builder()
            .with_bin_size(10)
            .with_num_of_bins(2)
            .with_region(85, 200)
            .finish()
            .unwrap();
        let histogram = run(config, &events);

        let mut out = Vec::new();
        histogram.write_counts(&mut out, true).unwrap();

        // 15 observable on the left, 100 on the right
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "-15.000000,1,0.500000\n\
             -5.000000,1,1.000000\n\
             0,1,0.000000\n\
             5.000000,0,1.000000\n\
             15.000000,1,1.000000\n"
        );

        let mut out = Vec::new();
        histogram.write_occupancy(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "-15.000000,0.500000\n\
             -5.000000,1.000000\n\
             0,0.000000\n\
             5.000000,1.000000\n\
             15.000000,1.000000\n"
        );
    }

    #[rstest]
    fn test_write_csv_split_outputs(events: EventStore) {
        let config = HistogramConfig::builder()
            .with_bin_size(10)
            .with_num_of_bins(2)
            .with_region(85, 200)
            .finish()
            .unwrap();
        let histogram = run(config, &events);

        let tempdir = tempfile::tempdir().unwrap();
        let counts = tempdir.path().join("counts.csv");
        let denom = tempdir.path().join("denom.csv");

        histogram
            .write_csv(counts.to_str().unwrap(), Some(denom.to_str().unwrap()))
            .unwrap();

        let counts = std::fs::read_to_string(counts).unwrap();
        assert!(counts.lines().all(|l| l.split(',').count() == 2));
        assert_eq!(std::fs::read_to_string(denom).unwrap().lines().count(), 5);
    }

    #[rstest]
    fn test_unwritable_occupancy_leaves_no_counts(events: EventStore) {
        let config = HistogramConfig::builder()
            .with_bin_size(10)
            .with_num_of_bins(2)
            .with_region(85, 200)
            .finish()
            .unwrap();
        let histogram = run(config, &events);

        let tempdir = tempfile::tempdir().unwrap();
        let counts = tempdir.path().join("counts.csv");
        // a regular file where a directory is needed
        let blocker = tempdir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let denom = blocker.join("denom.csv");

        assert!(
            histogram
                .write_csv(counts.to_str().unwrap(), Some(denom.to_str().unwrap()))
                .is_err()
        );
        assert!(!counts.exists());
        assert_eq!(std::fs::read_dir(tempdir.path()).unwrap().count(), 1);
    }
}
