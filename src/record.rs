use json::JsonValue;
use std::collections::HashMap;
use std::env;
use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A record of one benchmark run: what ran, with which parameters, when, and
/// what it produced. Serialized as one JSON object per run, appended to a
/// JSON-lines file.
pub struct RunRecord {
    benchmark_name: String,
    executable: PathBuf,
    parameters: Vec<String>,
    run_date: String,
    build_type: String,
    output: HashMap<String, String>,
}

impl RunRecord {
    /// Create a record named after the running executable, capturing its
    /// arguments and the run date.
    pub fn new() -> RunRecord {
        let executable = env::current_exe().unwrap_or_else(|_| PathBuf::from("<unknown>"));
        let benchmark_name = executable
            .file_stem()
            .unwrap_or(OsStr::new("<unknown>"))
            .to_string_lossy()
            .to_string();
        RunRecord {
            benchmark_name,
            executable,
            parameters: env::args().skip(1).collect(),
            run_date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            build_type: RunRecord::get_build_type(),
            output: HashMap::new(),
        }
    }

    /// Add a key/value pair to the output section of the record.
    pub fn with_output(&mut self, key: &str, value: String) {
        self.output.insert(key.to_string(), value);
    }

    pub fn as_json(&self) -> JsonValue {
        let mut obj = JsonValue::new_object();
        obj["benchmark name"] = self.benchmark_name.clone().into();
        obj["executable"] = self.executable.to_string_lossy().to_string().into();
        obj["parameters"] = self.parameters.clone().into();
        obj["run_date"] = self.run_date.clone().into();
        obj["build type"] = self.build_type.clone().into();
        obj["output"] = self.output.clone().into();
        obj
    }

    /// Write the record to `file` in JSON-lines form, creating the file and
    /// its parent directories if needed, appending if it exists.
    pub fn write(&self, file: &Path) {
        if let Some(parent) = file.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(file) {
            let _ = writeln!(f, "{}", json::stringify(self.as_json()));
        }
    }

    /// If in a standard build context, will be the parent dir. Else unknown.
    fn get_build_type() -> String {
        let exec = env::current_exe().unwrap_or_else(|_| PathBuf::from("<unknown>"));
        let alt_name = PathBuf::from("<unknown>");
        let parent = exec.parent().unwrap_or(alt_name.as_path());
        let build_type = parent
            .file_name()
            .unwrap_or(OsStr::new("<unknown>"))
            .to_string_lossy()
            .to_string();
        if ["debug", "release"].contains(&build_type.as_str()) {
            build_type
        } else {
            "<unknown>".to_string()
        }
    }
}
