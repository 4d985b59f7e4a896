use std::{fs, path::Path};

use regex::Regex;

use crate::error::{Error, Result};

#[derive(Default)]
pub struct TestData {
    pub pos: String,
    pub cmd: String,
    cmd_args: Vec<CmdArg>,
    pub input: String,
    pub expected: String,
}

pub struct CmdArg {
    key: String,
    vals: Vec<String>,
}

impl CmdArg {
    pub fn string(&self, idx: usize) -> String {
        self.vals[idx].clone()
    }
    pub fn int64(&self, idx: usize) -> i64 {
        self.vals[idx].parse().unwrap()
    }
    pub fn uint64(&self, idx: usize) -> u64 {
        self.vals[idx].parse().unwrap()
    }
    pub fn int64s(&self) -> Vec<i64> {
        (0..self.vals.len()).map(|i| self.int64(i)).collect()
    }
}

impl TestData {
    pub fn find_arg(&self, key: &str) -> Option<&CmdArg> {
        self.cmd_args.iter().find(|&f| f.key == key)
    }
    pub fn scan_args(&self, key: &str) -> &CmdArg {
        if let Some(arg) = self.find_arg(key) {
            arg
        } else {
            panic!("{}: missing args: {}", self.pos, key);
        }
    }
    pub fn has_arg(&self, key: &str) -> bool {
        self.find_arg(key).is_some()
    }
}

/// Runs every directive in the file at `path` through `f` and compares the
/// result with the expected block.
pub fn run_test<F: FnMut(&TestData) -> String>(path: impl AsRef<Path>, f: F) {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {}", path.display(), e));
    run(&content, &path.display().to_string(), f);
}

pub fn run_test_from_string<F: FnMut(&TestData) -> String>(input: impl AsRef<str>, f: F) {
    run(input.as_ref(), "<string>", f);
}

fn run<F: FnMut(&TestData) -> String>(input: &str, source: &str, mut f: F) {
    let datas = parse_test_data(input, source).unwrap();
    for data in datas.iter() {
        let s = f(data);
        assert_eq!(s, data.expected, "{}: {}", data.pos, data.cmd);
    }
}

/// Directive line, optional input lines, `----`, expected lines up to the
/// next blank line.
pub fn parse_test_data(input: &str, source: &str) -> Result<Vec<TestData>> {
    let mut datas = Vec::new();

    let mut iter = input.lines().enumerate();
    while let Some((line_no, line)) = iter.next() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let pos = format!("{}:{}", source, line_no + 1);
        let fields = split_directive(line)
            .map_err(|e| Error::InvalidArgument(format!("{}: {}", pos, e)))?;
        let mut data = TestData {
            pos,
            cmd: fields[0].clone(),
            ..Default::default()
        };
        for arg in &fields[1..] {
            if let Some(idx) = arg.find('=') {
                let key = arg[0..idx].to_owned();
                let val = &arg[idx + 1..];

                let vals = if val.len() > 2 && val.starts_with('(') && val.ends_with(')') {
                    val[1..val.len() - 1]
                        .split(',')
                        .map(|s| s.trim().to_owned())
                        .collect()
                } else {
                    vec![val.to_owned()]
                };
                data.cmd_args.push(CmdArg { key, vals });
            } else {
                data.cmd_args.push(CmdArg {
                    key: arg.clone(),
                    vals: Vec::new(),
                })
            }
        }

        let mut buf = String::new();
        let mut separator = false;
        for (_, line) in iter.by_ref() {
            if line == "----" {
                separator = true;
                break;
            }
            buf.push_str(line);
            buf.push('\n');
        }
        data.input = buf.trim().to_owned();

        if separator {
            let mut buf = String::new();
            for (_, line) in iter.by_ref() {
                let line = line.trim();
                if line.is_empty() {
                    break;
                }
                buf.push_str(line);
                buf.push('\n');
            }
            data.expected = buf;
        }
        datas.push(data);
    }

    Ok(datas)
}

const PATTERN: &str = r"^ *[a-zA-Z0-9_/,-\.]+(|=[-a-zA-Z0-9_@]+|=\([^)]*\))( |$)";

fn split_directive(mut line: &str) -> Result<Vec<String>> {
    let p = Regex::new(PATTERN).unwrap();
    let mut results = Vec::new();
    while !line.is_empty() {
        let m = p
            .find(line)
            .ok_or_else(|| Error::InvalidArgument(format!("cannot parse directive: {}", line)))?;
        let v = m.as_str();
        line = &line[v.len()..];
        results.push(v.trim().to_string());
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_directive() {
        let input = "insert keys=(5, -3, 8) heights=(1,2,3) seed=7 verbose";
        let cmds = split_directive(input).unwrap();
        assert_eq!(cmds.len(), 5);
        assert_eq!(cmds[0], "insert");
        assert_eq!(cmds[1], "keys=(5, -3, 8)");
        assert_eq!(cmds.last().unwrap(), "verbose");
    }

    #[test]
    fn test_split_directive_rejects_garbage() {
        assert!(matches!(
            split_directive("insert keys=(1"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_blocks() {
        let input = r"
# comment lines and blank lines are skipped
find keys=(3, 9) max_level=4 flag
----
3: true
9: false

scan
----
1 3 5 8
";
        let datas = parse_test_data(input, "inline").unwrap();
        assert_eq!(datas.len(), 2);

        let t = &datas[0];
        assert_eq!(t.pos, "inline:3");
        assert_eq!(t.cmd, "find");
        assert_eq!(t.input, "");
        assert_eq!(t.scan_args("keys").int64s(), vec![3, 9]);
        assert_eq!(t.scan_args("max_level").uint64(0), 4);
        assert!(t.has_arg("flag"));
        assert!(!t.has_arg("seed"));
        assert_eq!(t.expected, "3: true\n9: false\n");

        assert_eq!(datas[1].cmd, "scan");
        assert_eq!(datas[1].expected, "1 3 5 8\n");
    }

    #[test]
    fn test_from_string() {
        let input = r"
echo word=hungry count=(2)
monkey
----
2 hungry monkey
";
        let mut calls = 0;
        run_test_from_string(input, |t| {
            calls += 1;
            let count = t.scan_args("count");
            format!("{} {} {}\n", count.int64(0), t.scan_args("word").string(0), t.input)
        });
        assert_eq!(calls, 1);
    }
}
