//! The VM deployment wizard.

use clap::Args;

use infradesk_core::error::AppError;
use infradesk_core::types::{ClusterId, DatacenterId, NetworkId};
use infradesk_service::{Console, DeploymentWizard, WizardStep, submit_notification};

use super::resource;
use crate::output::{self, OutputFormat};

/// Arguments for `deploy`. Unset values are prompted for with `--interactive`.
#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Walk through the wizard steps with prompts
    #[arg(short, long)]
    pub interactive: bool,
    /// Number of VMs
    #[arg(long)]
    pub vm_count: Option<i64>,
    /// VM name prefix (defaults to "vm")
    #[arg(long)]
    pub prefix: Option<String>,
    #[arg(long)]
    pub datacenter: Option<DatacenterId>,
    #[arg(long)]
    pub cluster: Option<ClusterId>,
    #[arg(long)]
    pub network: Option<NetworkId>,
    /// CPU cores per VM
    #[arg(long)]
    pub cpu: Option<i64>,
    /// Memory per VM in MB
    #[arg(long)]
    pub memory: Option<i64>,
    /// Disk per VM in GB
    #[arg(long)]
    pub disk: Option<i64>,
    #[arg(long)]
    pub datastore: Option<String>,
    /// Let Terraform apply without a manual approval
    #[arg(long)]
    pub auto_approve: bool,
    /// Submit without the review confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the deployment wizard
pub async fn execute(args: &DeployArgs, console: &Console, format: OutputFormat) -> Result<(), AppError> {
    resource::require_session(console).await?;
    let service = console.deployments();
    let mut wizard = service.wizard().await?;

    apply_flags(args, &mut wizard)?;
    if args.interactive {
        prompt_steps(args, &mut wizard)?;
    }

    while wizard.step() != WizardStep::Review {
        wizard.next();
    }
    println!("{}", wizard.step());
    output::print_fields(&wizard.summary(), format);

    if !args.yes {
        let proceed = dialoguer::Confirm::new()
            .with_prompt("Submit this deployment?")
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
        if !proceed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let result = service.submit(&wizard).await;
    output::print_notification(&submit_notification(&result));
    let job = result?;
    output::print_kv("Job ID", &job.id.to_string());
    Ok(())
}

fn apply_flags(args: &DeployArgs, wizard: &mut DeploymentWizard) -> Result<(), AppError> {
    let form = &mut wizard.form;
    if let Some(count) = args.vm_count {
        form.vm_count = count;
    }
    if let Some(prefix) = &args.prefix {
        form.vm_name_prefix = prefix.clone();
    }
    if let Some(cpu) = args.cpu {
        form.cpu = cpu;
    }
    if let Some(memory) = args.memory {
        form.memory_mb = memory;
    }
    if let Some(disk) = args.disk {
        form.disk_size_gb = disk;
    }
    if let Some(datastore) = &args.datastore {
        form.datastore = datastore.clone();
    }
    form.auto_approve = args.auto_approve;

    if args.datacenter.is_some() {
        wizard.selection.select_datacenter(args.datacenter)?;
    }
    if args.cluster.is_some() {
        wizard.selection.select_cluster(args.cluster)?;
    }
    if args.network.is_some() {
        wizard.selection.select_network(args.network)?;
    }
    Ok(())
}

fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {e}"))
}

/// Prompt for everything the flags left unset, one wizard step at a time.
fn prompt_steps(args: &DeployArgs, wizard: &mut DeploymentWizard) -> Result<(), AppError> {
    loop {
        println!("{} ({})", wizard.step(), wizard.step().description());
        match wizard.step() {
            WizardStep::VmConfig => {
                if args.vm_count.is_none() {
                    wizard.form.vm_count = dialoguer::Input::new()
                        .with_prompt("VM count")
                        .default(wizard.form.vm_count)
                        .interact_text()
                        .map_err(input_error)?;
                }
                if args.prefix.is_none() {
                    wizard.form.vm_name_prefix = dialoguer::Input::new()
                        .with_prompt("VM name prefix")
                        .default("vm".to_string())
                        .interact_text()
                        .map_err(input_error)?;
                }
                if args.datacenter.is_none() {
                    let names: Vec<String> = wizard
                        .selection
                        .catalogue()
                        .datacenters
                        .iter()
                        .map(|dc| dc.name.clone())
                        .collect();
                    let picked = pick("Datacenter", &names)?;
                    let id = picked.map(|i| wizard.selection.catalogue().datacenters[i].id);
                    wizard.selection.select_datacenter(id)?;
                }
                if args.cluster.is_none() {
                    let options: Vec<_> = wizard
                        .selection
                        .cluster_options()
                        .iter()
                        .map(|c| (c.id, c.name.clone()))
                        .collect();
                    let names: Vec<String> = options.iter().map(|(_, n)| n.clone()).collect();
                    let id = pick("Cluster", &names)?.map(|i| options[i].0);
                    wizard.selection.select_cluster(id)?;
                }
                if args.network.is_none() {
                    let options: Vec<_> = wizard
                        .selection
                        .network_options()
                        .iter()
                        .map(|n| (n.id, n.display_name()))
                        .collect();
                    let names: Vec<String> = options.iter().map(|(_, n)| n.clone()).collect();
                    let id = pick("Network", &names)?.map(|i| options[i].0);
                    wizard.selection.select_network(id)?;
                }
            }
            WizardStep::Resources => {
                if args.cpu.is_none() {
                    wizard.form.cpu = dialoguer::Input::new()
                        .with_prompt("CPU cores")
                        .default(wizard.form.cpu)
                        .interact_text()
                        .map_err(input_error)?;
                }
                if args.memory.is_none() {
                    wizard.form.memory_mb = dialoguer::Input::new()
                        .with_prompt("Memory (MB)")
                        .default(wizard.form.memory_mb)
                        .interact_text()
                        .map_err(input_error)?;
                }
                if args.disk.is_none() {
                    wizard.form.disk_size_gb = dialoguer::Input::new()
                        .with_prompt("Disk (GB)")
                        .default(wizard.form.disk_size_gb)
                        .interact_text()
                        .map_err(input_error)?;
                }
            }
            WizardStep::TerraformOptions => {
                if args.datastore.is_none() {
                    wizard.form.datastore = dialoguer::Input::new()
                        .with_prompt("Datastore")
                        .allow_empty(true)
                        .interact_text()
                        .map_err(input_error)?;
                }
                if !args.auto_approve {
                    wizard.form.auto_approve = dialoguer::Confirm::new()
                        .with_prompt("Auto approve?")
                        .default(false)
                        .interact()
                        .map_err(input_error)?;
                }
            }
            WizardStep::Review => return Ok(()),
        }
        wizard.next();
    }
}

/// Select one of `names`; `None` when there is nothing to pick.
fn pick(prompt: &str, names: &[String]) -> Result<Option<usize>, AppError> {
    if names.is_empty() {
        output::print_warning(&format!("No {} options available.", prompt.to_lowercase()));
        return Ok(None);
    }
    dialoguer::Select::new()
        .with_prompt(prompt)
        .items(names)
        .default(0)
        .interact()
        .map(Some)
        .map_err(input_error)
}
