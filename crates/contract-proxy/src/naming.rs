//! Class and file names of generated proxies and contract classes.

const CONTRACT_CLASS_SUFFIX: &str = "_Contract";
const PROXY_CLASS_SUFFIX: &str = "_Proxy";

const CONTRACT_FILE_SUFFIX: &str = ".contract";
const PROXY_FILE_SUFFIX: &str = ".proxy";

/// `IUserDb_Contract` -> `IUserDb_Proxy`; without a contract class the
/// interface name is suffixed directly.
pub fn proxy_class_name(interface: &str, contract_class: Option<&str>) -> String {
    match contract_class {
        Some(class) if class.ends_with(CONTRACT_CLASS_SUFFIX) => {
            format!("{}{}", &class[..class.len() - CONTRACT_CLASS_SUFFIX.len()], PROXY_CLASS_SUFFIX)
        }
        Some(class) => format!("{}{}", class, PROXY_CLASS_SUFFIX),
        None => format!("{}{}", interface, PROXY_CLASS_SUFFIX),
    }
}

/// `IUserDb` -> `IUserDb_Contract`
pub fn contract_class_name(interface: &str) -> String {
    format!("{}{}", interface, CONTRACT_CLASS_SUFFIX)
}

/// File the contract class for `interface` is written to.
pub fn contract_file_name(interface: &str) -> String {
    format!("{}{}.cs", interface, CONTRACT_FILE_SUFFIX)
}

/// `IUserDb.contract.cs` -> `IUserDb.proxy.cs`
pub fn proxy_file_name(contract_file: &str) -> String {
    contract_file.replace(CONTRACT_FILE_SUFFIX, PROXY_FILE_SUFFIX)
}

/// File the proxy for `interface` is written to when no contract file is known.
pub fn default_proxy_file(interface: &str) -> String {
    format!("{}{}.cs", interface, PROXY_FILE_SUFFIX)
}
