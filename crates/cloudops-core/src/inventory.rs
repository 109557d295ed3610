//! Dashboard inventory: cloud resources, incidents, pipeline runs, the
//! operations checklist and utilization samples.
//!
//! Everything here is in-memory mock data; nothing is fetched or persisted.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    Running,
    Stopped,
    Pending,
    Failed,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Running => "Running",
            ResourceStatus::Stopped => "Stopped",
            ResourceStatus::Pending => "Pending",
            ResourceStatus::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Vm,
    Storage,
    Network,
    Database,
}

impl ResourceType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceType::Vm => "Virtual Machine",
            ResourceType::Storage => "S3 Bucket / Blob",
            ResourceType::Network => "VPC / VNet",
            ResourceType::Database => "RDS / SQL Instance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudProvider {
    Aws,
    Azure,
}

impl CloudProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "AWS",
            CloudProvider::Azure => "Azure",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CloudResource {
    pub id: String,
    pub name: String,
    pub resource_type: ResourceType,
    pub provider: CloudProvider,
    pub status: ResourceStatus,
    /// Percentage, 0-100
    pub usage: u8,
    pub location: String,
}

impl CloudResource {
    /// Usage above this percentage is drawn as a warning.
    pub const HIGH_USAGE: u8 = 80;

    pub fn is_high_usage(&self) -> bool {
        self.usage > Self::HIGH_USAGE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentStatus {
    Open,
    Resolved,
}

impl IncidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Open => "Open",
            IncidentStatus::Resolved => "Resolved",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Incident {
    pub id: String,
    pub timestamp: String,
    pub severity: Severity,
    pub message: String,
    pub status: IncidentStatus,
    pub assigned_to: Option<String>,
}

impl Incident {
    pub fn is_open(&self) -> bool {
        self.status == IncidentStatus::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    Success,
    InProgress,
    Failed,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Success => "Success",
            PipelineStatus::InProgress => "In Progress",
            PipelineStatus::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineJob {
    pub id: String,
    pub name: String,
    pub status: PipelineStatus,
    pub duration: String,
    pub triggered_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistCategory {
    Daily,
    Security,
    Cleanup,
}

impl ChecklistCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistCategory::Daily => "Daily",
            ChecklistCategory::Security => "Security",
            ChecklistCategory::Cleanup => "Cleanup",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChecklistItem {
    pub id: String,
    pub task: String,
    pub completed: bool,
    pub category: ChecklistCategory,
}

/// One hourly CPU/memory sample for the utilization chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtilizationSample {
    pub time: &'static str,
    pub cpu: u8,
    pub mem: u8,
}

/// Prewritten questions offered on the mentor AI tab.
pub const COMMON_GUIDES: [&str; 4] = [
    "VM Connection Timeout",
    "Insufficient Storage Quota",
    "IAM Access Denied",
    "CI/CD Build Failure",
];

/// Question sent to the mentor when a common guide is chosen.
pub fn guide_question(guide: &str) -> String {
    format!("I am seeing a {} error.", guide)
}

/// Headline card on the dashboard tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub change: &'static str,
}

impl StatCard {
    pub fn is_positive(&self) -> bool {
        self.change.starts_with('+')
    }
}

/// All dashboard data for one session.
#[derive(Debug, Clone)]
pub struct Inventory {
    pub resources: Vec<CloudResource>,
    pub incidents: Vec<Incident>,
    pub pipelines: Vec<PipelineJob>,
    pub checklist: Vec<ChecklistItem>,
    pub utilization: Vec<UtilizationSample>,
}

impl Inventory {
    pub fn mock() -> Self {
        Self {
            resources: mock_resources(),
            incidents: mock_incidents(),
            pipelines: mock_pipelines(),
            checklist: mock_checklist(),
            utilization: mock_utilization(),
        }
    }

    pub fn active_resource_count(&self) -> usize {
        self.resources
            .iter()
            .filter(|r| r.status == ResourceStatus::Running)
            .count()
    }

    pub fn open_incident_count(&self) -> usize {
        self.incidents.iter().filter(|i| i.is_open()).count()
    }

    pub fn completed_checklist_count(&self) -> usize {
        self.checklist.iter().filter(|c| c.completed).count()
    }

    /// Flip the completion flag of a checklist item. Returns false for an
    /// unknown id.
    pub fn toggle_checklist(&mut self, id: &str) -> bool {
        match self.checklist.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.completed = !item.completed;
                true
            }
            None => false,
        }
    }

    /// Incidents shown in the dashboard's alert panel.
    pub fn critical_alerts(&self) -> &[Incident] {
        let end = self.incidents.len().min(3);
        &self.incidents[..end]
    }

    pub fn stat_cards(&self) -> Vec<StatCard> {
        vec![
            StatCard {
                title: "Active Resources",
                value: self.active_resource_count().to_string(),
                change: "+2",
            },
            StatCard {
                title: "System Health",
                value: "98.2%".to_string(),
                change: "+0.4%",
            },
            StatCard {
                title: "Open Incidents",
                value: self.open_incident_count().to_string(),
                change: "-1",
            },
            StatCard {
                title: "Cloud Spend",
                value: "$1,240".to_string(),
                change: "+12%",
            },
        ]
    }
}

fn resource(
    id: &str,
    name: &str,
    resource_type: ResourceType,
    provider: CloudProvider,
    status: ResourceStatus,
    usage: u8,
    location: &str,
) -> CloudResource {
    CloudResource {
        id: id.to_string(),
        name: name.to_string(),
        resource_type,
        provider,
        status,
        usage,
        location: location.to_string(),
    }
}

fn mock_resources() -> Vec<CloudResource> {
    use CloudProvider::*;
    use ResourceStatus::*;
    use ResourceType::*;

    vec![
        resource("1", "prod-web-server-01", Vm, Azure, Running, 42, "East US"),
        resource("2", "app-data-storage", Storage, Azure, Running, 15, "West Europe"),
        resource("3", "dev-db-instance", Database, Aws, Stopped, 0, "us-east-1"),
        resource("4", "staging-vpc-01", Network, Aws, Running, 8, "us-west-2"),
        resource("5", "billing-reports-s3", Storage, Aws, Failed, 0, "us-east-1"),
    ]
}

fn incident(
    id: &str,
    timestamp: &str,
    severity: Severity,
    message: &str,
    status: IncidentStatus,
) -> Incident {
    Incident {
        id: id.to_string(),
        timestamp: timestamp.to_string(),
        severity,
        message: message.to_string(),
        status,
        assigned_to: None,
    }
}

fn mock_incidents() -> Vec<Incident> {
    vec![
        incident(
            "inc-101",
            "2023-10-24 09:15",
            Severity::Critical,
            "VM \"prod-web-server-01\" exceeded 95% CPU threshold.",
            IncidentStatus::Open,
        ),
        incident(
            "inc-102",
            "2023-10-24 08:30",
            Severity::Warning,
            "S3 Bucket \"billing-reports-s3\" access denied (IAM mismatch).",
            IncidentStatus::Open,
        ),
        incident(
            "inc-103",
            "2023-10-23 16:45",
            Severity::Info,
            "Security patch applied to VPC network interfaces.",
            IncidentStatus::Resolved,
        ),
    ]
}

fn pipeline(id: &str, name: &str, status: PipelineStatus, duration: &str, triggered_by: &str) -> PipelineJob {
    PipelineJob {
        id: id.to_string(),
        name: name.to_string(),
        status,
        duration: duration.to_string(),
        triggered_by: triggered_by.to_string(),
    }
}

fn mock_pipelines() -> Vec<PipelineJob> {
    vec![
        pipeline("run-882", "Frontend-CI", PipelineStatus::Success, "2m 14s", "git-push"),
        pipeline("run-881", "Backend-CD", PipelineStatus::Failed, "4m 02s", "manual"),
        pipeline("run-880", "Infrastructure-TF", PipelineStatus::Success, "12m 55s", "schedule"),
    ]
}

fn check(id: &str, task: &str, completed: bool, category: ChecklistCategory) -> ChecklistItem {
    ChecklistItem {
        id: id.to_string(),
        task: task.to_string(),
        completed,
        category,
    }
}

fn mock_checklist() -> Vec<ChecklistItem> {
    use ChecklistCategory::*;

    vec![
        check("c1", "Review CloudWatch/Azure Monitor critical alerts", true, Daily),
        check("c2", "Check storage quota usage across all dev buckets", false, Daily),
        check("c3", "Validate IAM roles for new team members", false, Security),
        check("c4", "Terminate unassigned elastic IPs/idle resources", true, Cleanup),
    ]
}

fn mock_utilization() -> Vec<UtilizationSample> {
    [
        ("08:00", 30, 45),
        ("09:00", 45, 48),
        ("10:00", 95, 55),
        ("11:00", 40, 50),
        ("12:00", 35, 48),
        ("13:00", 55, 52),
        ("14:00", 48, 49),
    ]
    .into_iter()
    .map(|(time, cpu, mem)| UtilizationSample { time, cpu, mem })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_counts() {
        let inventory = Inventory::mock();
        assert_eq!(inventory.resources.len(), 5);
        assert_eq!(inventory.active_resource_count(), 3);
        assert_eq!(inventory.open_incident_count(), 2);
        assert_eq!(inventory.completed_checklist_count(), 2);
        assert_eq!(inventory.utilization.len(), 7);
    }

    #[test]
    fn test_toggle_checklist() {
        let mut inventory = Inventory::mock();
        assert!(inventory.toggle_checklist("c2"));
        assert_eq!(inventory.completed_checklist_count(), 3);
        assert!(inventory.toggle_checklist("c2"));
        assert_eq!(inventory.completed_checklist_count(), 2);
    }

    #[test]
    fn test_toggle_unknown_item() {
        let mut inventory = Inventory::mock();
        assert!(!inventory.toggle_checklist("nope"));
        assert_eq!(inventory.completed_checklist_count(), 2);
    }

    #[test]
    fn test_stat_cards_follow_inventory() {
        let mut inventory = Inventory::mock();
        inventory.incidents[0].status = IncidentStatus::Resolved;

        let cards = inventory.stat_cards();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].value, "3");
        assert_eq!(cards[2].title, "Open Incidents");
        assert_eq!(cards[2].value, "1");
        assert!(!cards[2].is_positive());
        assert!(cards[3].is_positive());
    }

    #[test]
    fn test_critical_alerts_caps_at_three() {
        let mut inventory = Inventory::mock();
        let extra = inventory.incidents[0].clone();
        inventory.incidents.push(extra);
        assert_eq!(inventory.critical_alerts().len(), 3);

        inventory.incidents.truncate(1);
        assert_eq!(inventory.critical_alerts().len(), 1);
    }

    #[test]
    fn test_guide_question() {
        assert_eq!(
            guide_question("IAM Access Denied"),
            "I am seeing a IAM Access Denied error."
        );
    }

    #[test]
    fn test_high_usage_threshold() {
        let mut res = Inventory::mock().resources.remove(0);
        res.usage = 80;
        assert!(!res.is_high_usage());
        res.usage = 81;
        assert!(res.is_high_usage());
    }
}
