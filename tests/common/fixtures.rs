//! Static log corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of representative lines in one
//! of the shapes the normalizer distinguishes.

/// Lines in the strict `timestamp source[pid]: level message` form.
pub const CORPUS_STRICT: &[&str] = &[
    "2024-01-15T10:00:00Z kubelet[1042]: INFO Pulling image \"nginx:1.25\"",
    "2024-01-15T10:00:01Z api[7]: ERROR upstream returned 503",
    "2024-01-15T10:00:02Z  worker-4c2a[88]:  WARN  queue backlog growing: 47 pending  ",
    "2024-01-15T10:00:03Z kube-scheduler[1]: Info Successfully assigned default/api-7f9b4d to node-2",
    "2024-01-15T10:00:04Z containerd shim[3321]: DEBUG exec started id=4f2a",
];

/// Lines that only the fallback (timestamp token + message) recovers.
pub const CORPUS_FALLBACK: &[&str] = &[
    "2024-01-15T10:00:00.123456Z stdout F server listening on :8080",
    "2024-01-15T10:00:01Z Back-off restarting failed container",
    "2024-01-15T10:00:02+00:00Z odd offset but still ends in Z",
    "Z lone Z token counts as a timestamp",
];

/// Lines that produce no record at all.
pub const CORPUS_NOISE: &[&str] = &[
    "",
    "    ",
    "\t",
    "I0115 10:00:00.000000       1 main.go:42] starting",
    "Events:",
    "  Warning  BackOff  3m (x12 over 5m)  kubelet  Back-off restarting failed container",
    "2024-01-15T10:00:00Z",
];

/// One signature line per built-in rule, in rule-table order. Each line
/// triggers only its own rule.
pub const RULE_SIGNATURES: &[&str] = &[
    "Last State: Terminated Reason: OOMKilled",
    "GET /api/v1/orders HTTP 503",
    "pod checkout-api is in CrashLoopBackOff",
    "Warning ImagePullBackOff for nginx:latst",
    "Back-off restarting failed container",
    "Warning FailedMount Unable to attach or mount volumes",
    "Readiness probe failed: connection refused",
    "Normal Started container api",
];

/// A single strict line reporting a crash loop.
pub const CRASHLOOP_LINE: &str = "2024-01-01T00:00:00Z api[123]: ERROR CrashLoopBackOff detected";

/// Path of the bundled sample log.
pub fn sample_log_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_logs/k8s_sample.log")
}

/// Contents of the bundled sample log.
pub fn sample_log_text() -> String {
    std::fs::read_to_string(sample_log_path()).expect("bundled sample log must exist")
}

/// A report with the four expected sections.
pub const CANNED_REPORT: &str = "\
## Summary
- checkout-api is crash-looping after being OOMKilled.

## Root Cause (probable)
- Memory limit of 256Mi is too low for the current heap.

## Recommended Fix
- `kubectl set resources deploy/checkout-api --limits=memory=512Mi`

## Next Steps
- Watch `kubectl get pods -w` until restarts stop.
";
