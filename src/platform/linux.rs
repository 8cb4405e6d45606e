// Linux /proc parsing. Parsers are platform-independent so they can be tested anywhere.

use crate::error::{MonitorError, Result};
use crate::models::CpuTicks;

const PROC_STAT: &str = "/proc/stat";

/// Read the aggregate `cpu` line of /proc/stat.
pub(super) fn read_cpu_ticks() -> Result<CpuTicks> {
    #[cfg(target_os = "linux")]
    {
        let content =
            std::fs::read_to_string(PROC_STAT).map_err(|e| MonitorError::io(PROC_STAT, e))?;
        parse_cpu_ticks(&content)
    }
    #[cfg(not(target_os = "linux"))]
    Err(MonitorError::Unsupported("cpu tick counters"))
}

/// Parse `cpu  user nice system idle ...` from /proc/stat content.
/// Only the first four columns are used; iowait and later are ignored.
pub fn parse_cpu_ticks(content: &str) -> Result<CpuTicks> {
    let line = content
        .lines()
        .find(|l| l.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| MonitorError::Parse {
            what: PROC_STAT,
            detail: "no aggregate cpu line".into(),
        })?;
    let mut fields = line.split_whitespace().skip(1).map(|v| {
        v.parse::<u64>().map_err(|e| MonitorError::Parse {
            what: PROC_STAT,
            detail: format!("{:?}: {}", v, e),
        })
    });
    let mut next = |column: &str| {
        fields.next().unwrap_or_else(|| {
            Err(MonitorError::Parse {
                what: PROC_STAT,
                detail: format!("missing {} column", column),
            })
        })
    };
    Ok(CpuTicks {
        user: next("user")?,
        nice: next("nice")?,
        system: next("system")?,
        idle: next("idle")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aggregate_line() {
        let content = "cpu  4705 356 584 3699176 23060 0 277 0 0 0\n\
                       cpu0 1393 80 171 924498 5732 0 184 0 0 0\n\
                       intr 1462898\n";
        let ticks = parse_cpu_ticks(content).unwrap();
        assert_eq!(
            ticks,
            CpuTicks {
                user: 4705,
                nice: 356,
                system: 584,
                idle: 3699176,
            }
        );
    }

    #[test]
    fn skips_per_core_lines_before_aggregate() {
        let content = "cpu0 1 2 3 4\ncpu 10 20 30 40\n";
        assert_eq!(parse_cpu_ticks(content).unwrap().system, 30);
    }

    #[test]
    fn rejects_truncated_line() {
        let err = parse_cpu_ticks("cpu 1 2 3\n").unwrap_err();
        assert!(err.to_string().contains("idle"));
    }

    #[test]
    fn rejects_non_numeric_column() {
        assert!(parse_cpu_ticks("cpu 1 x 3 4\n").is_err());
    }

    #[test]
    fn rejects_missing_cpu_line() {
        assert!(parse_cpu_ticks("intr 5\nctxt 9\n").is_err());
    }
}
