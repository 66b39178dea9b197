use ferrous_mx_application::use_cases::ResolveMailHostsUseCase;

/// Prints the hosts in delivery order: preference, name, address.
pub fn run_mx(engine: &ResolveMailHostsUseCase, domain: &str) -> anyhow::Result<()> {
    let list = engine.execute(domain);
    if !list.is_success() {
        anyhow::bail!("{}: {}", domain, list.status());
    }

    for host in list.iter() {
        let address = engine
            .host_address(host)
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:>5} {} {}", host.preference(), host.name(), address);
    }
    Ok(())
}
