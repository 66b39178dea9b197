mod resolve_mail_hosts;

pub use resolve_mail_hosts::ResolveMailHostsUseCase;
