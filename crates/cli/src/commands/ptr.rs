use ferrous_mx_application::use_cases::ReverseLookupUseCase;
use std::net::Ipv4Addr;

pub fn run_ptr(reverse: &ReverseLookupUseCase, ip: Ipv4Addr) -> anyhow::Result<()> {
    match reverse.execute(ip)? {
        Some(name) => println!("{}", name),
        None => anyhow::bail!("{}: no PTR record", ip),
    }
    Ok(())
}
