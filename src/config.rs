use crate::error::MazeError;
use crate::materializer::Layout;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_ROWS: usize = 6;
const DEFAULT_COLUMNS: usize = 8;
const DEFAULT_FPS: u64 = 60;
const HUD_ROWS: u16 = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub rows: usize,
    pub columns: usize,
    pub fps: u64,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl Settings {
    pub fn from_env(terminal_size: (u16, u16)) -> Result<Self, MazeError> {
        Self::from_lookup(|name| std::env::var(name).ok(), terminal_size)
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        (term_w, term_h): (u16, u16),
    ) -> Result<Self, MazeError> {
        let rows = parse_var(&lookup, "MAZE_ROWS")?.unwrap_or(DEFAULT_ROWS);
        let columns = parse_var(&lookup, "MAZE_COLUMNS")?.unwrap_or(DEFAULT_COLUMNS);
        if rows == 0 || columns == 0 {
            return Err(MazeError::InvalidDimensions { rows, columns });
        }

        let fps = lookup("MAZE_FPS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_FPS);
        let seed = parse_var(&lookup, "MAZE_SEED")?;
        let log_file = lookup("MAZE_LOG_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let viewport_width = term_w;
        let viewport_height = term_h.saturating_sub(HUD_ROWS);
        if (viewport_width as usize) < columns || (viewport_height as usize) < rows {
            return Err(MazeError::ViewportTooSmall {
                width: viewport_width,
                height: viewport_height,
                rows,
                columns,
            });
        }

        Ok(Settings {
            rows,
            columns,
            fps,
            seed,
            log_file,
            viewport_width,
            viewport_height,
        })
    }

    pub fn layout(&self) -> Result<Layout, MazeError> {
        Layout::new(
            self.rows,
            self.columns,
            self.viewport_width as f32,
            self.viewport_height as f32,
        )
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, MazeError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(MazeError::InvalidSetting { name, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)], size: (u16, u16)) -> Result<Settings, MazeError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned(), size)
    }

    #[test]
    fn defaults() {
        let s = settings(&[], (80, 25)).unwrap();
        assert_eq!((s.rows, s.columns, s.fps, s.seed), (6, 8, 60, None));
        assert_eq!((s.viewport_width, s.viewport_height), (80, 24));
        assert_eq!(s.layout().unwrap(), Layout::new(6, 8, 80.0, 24.0).unwrap());
    }

    #[test]
    fn reads_overrides() {
        let s = settings(
            &[
                ("MAZE_ROWS", "10"),
                ("MAZE_COLUMNS", "12"),
                ("MAZE_SEED", "42"),
                ("MAZE_FPS", "30"),
                ("MAZE_LOG_FILE", "/tmp/maze.log"),
            ],
            (120, 41),
        )
        .unwrap();
        assert_eq!((s.rows, s.columns, s.fps, s.seed), (10, 12, 30, Some(42)));
        assert_eq!(s.log_file, Some(PathBuf::from("/tmp/maze.log")));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            settings(&[("MAZE_ROWS", "0")], (80, 25)),
            Err(MazeError::InvalidDimensions { rows: 0, columns: 8 })
        ));
        assert!(matches!(
            settings(&[("MAZE_COLUMNS", "0")], (80, 25)),
            Err(MazeError::InvalidDimensions { rows: 6, columns: 0 })
        ));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            settings(&[("MAZE_ROWS", "-3")], (80, 25)),
            Err(MazeError::InvalidSetting { name: "MAZE_ROWS", .. })
        ));
        assert!(matches!(
            settings(&[("MAZE_SEED", "abc")], (80, 25)),
            Err(MazeError::InvalidSetting { name: "MAZE_SEED", .. })
        ));
    }

    #[test]
    fn bad_fps_falls_back_to_default() {
        let s = settings(&[("MAZE_FPS", "0")], (80, 25)).unwrap();
        assert_eq!(s.fps, 60);
    }

    #[test]
    fn viewport_must_fit_one_char_per_cell() {
        assert!(matches!(
            settings(&[("MAZE_ROWS", "30")], (80, 25)),
            Err(MazeError::ViewportTooSmall { height: 24, .. })
        ));
        assert!(settings(&[("MAZE_ROWS", "24")], (80, 25)).is_ok());
    }
}
