//! The four-step VM deployment wizard.

use std::fmt;

use tracing::info;

use infradesk_client::ApiClient;
use infradesk_core::error::AppError;
use infradesk_core::result::AppResult;
use infradesk_entity::{DeploymentJob, NewDeploymentJob};

use super::engine::{Catalogue, SelectionEngine};

/// Steps in order. Navigation clamps to the first and last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    VmConfig,
    Resources,
    TerraformOptions,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::VmConfig,
        WizardStep::Resources,
        WizardStep::TerraformOptions,
        WizardStep::Review,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::VmConfig => "VM Config",
            Self::Resources => "Resources",
            Self::TerraformOptions => "Terraform Options",
            Self::Review => "Review",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::VmConfig => "VM count, datacenter, cluster, network",
            Self::Resources => "CPU, memory, disk",
            Self::TerraformOptions => "Terraform provider & apply options",
            Self::Review => "Check all info before deploy",
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    fn back(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {}/{}: {}",
            self.index() + 1,
            Self::ALL.len(),
            self.title()
        )
    }
}

/// Non-placement wizard fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentForm {
    pub vm_count: i64,
    /// Empty means "vm".
    pub vm_name_prefix: String,
    pub datastore: String,
    /// Cores per VM.
    pub cpu: i64,
    pub memory_mb: i64,
    pub disk_size_gb: i64,
    pub auto_approve: bool,
}

impl Default for DeploymentForm {
    fn default() -> Self {
        Self {
            vm_count: 1,
            vm_name_prefix: String::new(),
            datastore: String::new(),
            cpu: 2,
            memory_mb: 4096,
            disk_size_gb: 50,
            auto_approve: false,
        }
    }
}

impl DeploymentForm {
    /// The prefix actually used for VM names.
    pub fn effective_prefix(&self) -> &str {
        match self.vm_name_prefix.trim() {
            "" => "vm",
            prefix => prefix,
        }
    }
}

/// Step position, form fields, and placement selection for one deployment.
#[derive(Debug, Clone)]
pub struct DeploymentWizard {
    step: WizardStep,
    pub form: DeploymentForm,
    pub selection: SelectionEngine,
}

impl DeploymentWizard {
    pub fn new(catalogue: Catalogue) -> Self {
        Self {
            step: WizardStep::VmConfig,
            form: DeploymentForm::default(),
            selection: SelectionEngine::new(catalogue),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn next(&mut self) -> WizardStep {
        self.step = self.step.next();
        self.step
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.back();
        self.step
    }

    /// The job to submit. Fails with a `Validation` error unless
    /// datacenter, cluster, and network are all chosen.
    pub fn build_job(&self) -> AppResult<NewDeploymentJob> {
        let (datacenter, cluster, network) = self.selection.chain().require_complete()?;
        let prefix = self.form.effective_prefix();

        Ok(NewDeploymentJob {
            name: format!("Deploy {prefix}"),
            vm_name: prefix.to_string(),
            vm_count: self.form.vm_count,
            cpu: self.form.cpu,
            memory: self.form.memory_mb,
            datastore: self.form.datastore.clone(),
            datacenter,
            cluster,
            network,
        })
    }

    /// Label/value rows for the review step, with ids resolved to names.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let chain = self.selection.chain();
        let catalogue = self.selection.catalogue();
        let unset = || "-".to_string();

        let datacenter = chain
            .datacenter
            .and_then(|id| catalogue.datacenter(id))
            .map_or_else(unset, |dc| dc.name.clone());
        let cluster = chain
            .cluster
            .and_then(|id| catalogue.cluster(id))
            .map_or_else(unset, |c| c.name.clone());
        let network = chain
            .network
            .and_then(|id| catalogue.network(id))
            .map_or_else(unset, |n| n.display_name());

        vec![
            ("VM Count", self.form.vm_count.to_string()),
            ("VM Name Prefix", self.form.effective_prefix().to_string()),
            ("Datacenter", datacenter),
            ("Cluster", cluster),
            ("Network", network),
            ("CPU", self.form.cpu.to_string()),
            ("Memory (MB)", self.form.memory_mb.to_string()),
            ("Disk (GB)", self.form.disk_size_gb.to_string()),
            ("Datastore", self.form.datastore.clone()),
            ("Auto Approve", if self.form.auto_approve { "Yes" } else { "No" }.to_string()),
        ]
    }

    /// Validate, then `POST /deployments/`. Nothing is sent unless the
    /// placement is complete and a token is present.
    pub async fn submit(&self, client: &ApiClient, token: Option<&str>) -> AppResult<DeploymentJob> {
        let job = self.build_job()?;
        let token = token.ok_or_else(|| AppError::authentication("Please login to deploy VMs."))?;

        let created = client.create_deployment(token, &job).await.into_result()?;
        info!(job_id = %created.id, vm_count = job.vm_count, "Deployment submitted");
        Ok(created)
    }
}
