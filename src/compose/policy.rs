use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical order of the top-level keys of a compose document.
pub const DOCUMENT_ORDER: &[&str] = &["version", "services", "volumes", "networks", "secrets"];

/// Canonical order of the keys of a service definition. Keys not listed here
/// keep their original position after the listed ones.
pub const SERVICE_ORDER: &[&str] = &[
    "image",
    "command",
    "entrypoint",
    "container_name",
    "links",
    "volumes_from",
    "volumes",
    "volume_driver",
    "tmpfs",
    "build",
    "expose",
    "ports",
    "net",
    "network_mode",
    "networks",
    "deploy",
    "labels",
    "devices",
    "read_only",
    "healthcheck",
    "env_file",
    "environment",
    "secrets",
    "cpu_shares",
    "cpu_quota",
    "cpuset",
    "domainname",
    "hostname",
    "ipc",
    "mac_address",
    "mem_limit",
    "memswap_limit",
    "privileged",
    "shm_size",
    "depends_on",
    "extends",
    "external_links",
    "stdin_open",
    "user",
    "working_dir",
    "extra_hosts",
    "restart",
    "ulimits",
    "tty",
    "dns",
    "dns_search",
    "pid",
    "security_opt",
    "cap_add",
    "cap_drop",
    "cgroup_parent",
    "logging",
    "log_driver",
    "log_opt",
    "stopsignal",
    "stop_signal",
    "stop_grace_period",
    "sysctls",
    "userns_mode",
    "autodestroy",
    "autoredeploy",
    "deployment_strategy",
    "sequential_deployment",
    "tags",
    "target_num_containers",
    "roles",
];

/// Which service fields get their elements alphabetized when the value is a
/// list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Alphabetize {
    /// `depends_on`, `ports` and `volumes`
    #[default]
    Basic,
    /// Additionally `environment` and `labels`
    Extended,
}

impl Alphabetize {
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Alphabetize::Basic => &["depends_on", "ports", "volumes"],
            Alphabetize::Extended => {
                &["depends_on", "environment", "labels", "ports", "volumes"]
            }
        }
    }
}

/// Which file names count as compose files when scanning a directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FileMatch {
    /// Files named `docker-compose*.yml` or `docker-compose*.yaml`
    #[default]
    Compose,
    /// Every `.yml` or `.yaml` file
    AnyYaml,
}

impl FileMatch {
    pub fn matches(self, file_name: &str) -> bool {
        static COMPOSE_NAME: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^docker-compose.*\.ya?ml$").unwrap());
        static ANY_YAML_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.ya?ml$").unwrap());
        match self {
            FileMatch::Compose => COMPOSE_NAME.is_match(file_name),
            FileMatch::AnyYaml => ANY_YAML_NAME.is_match(file_name),
        }
    }
}

/// The key orders and the alphabetized field set for one run. Passed into the
/// reorder functions so the transform depends only on its inputs.
#[derive(Debug, Clone, Copy)]
pub struct SortPolicy {
    pub document: &'static [&'static str],
    pub service: &'static [&'static str],
    pub alphabetized: &'static [&'static str],
}

impl SortPolicy {
    pub fn new(alphabetize: Alphabetize) -> Self {
        Self {
            document: DOCUMENT_ORDER,
            service: SERVICE_ORDER,
            alphabetized: alphabetize.fields(),
        }
    }
}

impl Default for SortPolicy {
    fn default() -> Self {
        Self::new(Alphabetize::default())
    }
}
