#[cfg(test)]
mod ipv4_tests {
    use cidrkit::{BigInteger, Family, IpAddress};

    fn ip(s: &str) -> IpAddress {
        IpAddress::parse(s).unwrap()
    }

    fn strs(list: &[IpAddress]) -> Vec<String> {
        list.iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_valid_and_invalid() {
        for s in ["10.0.0.1", "10.0.0.0", "10.0.0", "10.0", "0.0.0.0/0", "10.0.0.1/255.255.0.0"] {
            assert!(IpAddress::is_valid(s), "{} should be valid", s);
        }
        for s in ["10.0.0.256", "10.0.0.0.0", "10.0.0.1/33", "10.0.0.1/255.0.255.0", "10.0.0.x", "10"] {
            assert!(!IpAddress::is_valid(s), "{} should be invalid", s);
        }
        assert!(IpAddress::is_valid_ipv4("172.16.10.1"));
        assert!(!IpAddress::is_valid_ipv4("172.16.10.1.1"));
    }

    #[test]
    fn test_netmasks() {
        let cases = [
            ("0.0.0.0/0", "0.0.0.0"),
            ("10.0.0.0/8", "255.0.0.0"),
            ("172.16.0.0/16", "255.255.0.0"),
            ("192.168.0.0/24", "255.255.255.0"),
            ("192.168.100.4/30", "255.255.255.252"),
        ];
        for (addr, mask) in cases {
            assert_eq!(ip(addr).prefix().to_ip_str(), mask, "{}", addr);
        }
        assert!(IpAddress::is_valid_netmask("255.255.255.0"));
        assert!(!IpAddress::is_valid_netmask("10.0.0.1"));
        assert_eq!(ip("10.0.0.1/255.255.255.0").prefix().length(), 24);
    }

    #[test]
    fn test_decimal_values() {
        let cases = [
            ("0.0.0.0/0", 0u32),
            ("10.0.0.0/8", 167772160),
            ("172.16.0.0/16", 2886729728),
            ("192.168.0.0/24", 3232235520),
            ("192.168.100.4/30", 3232261124),
        ];
        for (addr, value) in cases {
            assert_eq!(ip(addr).host_u32(), Some(value), "{}", addr);
        }
    }

    #[test]
    fn test_network_broadcast_hosts() {
        let a = ip("172.16.10.1/24");
        assert_eq!(a.family(), Family::V4);
        assert_eq!(a.network().to_string(), "172.16.10.0/24");
        assert_eq!(a.broadcast().to_string(), "172.16.10.255/24");
        assert_eq!(a.first().to_s(), "172.16.10.1");
        assert_eq!(a.last().to_s(), "172.16.10.254");
        assert_eq!(a.size(), BigInteger::from(256u32));
        assert_eq!(ip("10.0.0.0/8").size().to_string(), "16777216");
        assert_eq!(ip("0.0.0.0/0").size().to_string(), "4294967296");
    }

    #[test]
    fn test_octets_and_bits() {
        let a = ip("172.16.10.1/24");
        assert_eq!(a.parts(), vec![172, 16, 10, 1]);
        assert_eq!(a.to_s_uncompressed(), "172.16.10.1");
        assert_eq!(a.to_hex(), "ac100a01");
        assert_eq!(a.dns_parts(), vec![1, 10, 16, 172]);
        assert_eq!(ip("127.0.0.1").bits(), "01111111000000000000000000000001");
        assert_eq!(a.prefix().bits(), "11111111111111111111111100000000");
    }

    #[test]
    fn test_change_prefix_and_netmask() {
        let a = ip("10.1.2.3/8");
        assert_eq!(a.change_prefix(24).unwrap().to_string(), "10.1.2.3/24");
        assert!(a.change_prefix(33).is_err());
        assert_eq!(a.change_netmask("255.255.255.0").unwrap().prefix().length(), 24);
        assert_eq!(a.change_netmask("16").unwrap().prefix().length(), 16);
        assert!(a.change_netmask("255.0.255.0").is_err());
    }

    #[test]
    fn test_split_vectors() {
        let a = ip("172.16.10.0/24");
        let expect = |n: usize, nets: &[&str]| {
            assert_eq!(strs(&a.split(n).unwrap()), nets, "split({})", n);
        };
        expect(8, &[
            "172.16.10.0/27", "172.16.10.32/27", "172.16.10.64/27", "172.16.10.96/27",
            "172.16.10.128/27", "172.16.10.160/27", "172.16.10.192/27", "172.16.10.224/27",
        ]);
        expect(6, &[
            "172.16.10.0/27", "172.16.10.32/27", "172.16.10.64/27", "172.16.10.96/27",
            "172.16.10.128/26", "172.16.10.192/26",
        ]);
        expect(5, &[
            "172.16.10.0/27", "172.16.10.32/27", "172.16.10.64/27", "172.16.10.96/27",
            "172.16.10.128/25",
        ]);
        expect(4, &["172.16.10.0/26", "172.16.10.64/26", "172.16.10.128/26", "172.16.10.192/26"]);
        expect(2, &["172.16.10.0/25", "172.16.10.128/25"]);
        assert!(a.split(0).is_err());
        assert!(a.split(257).is_err());
    }

    #[test]
    fn test_split_leaves_source_alone() {
        let a = ip("172.16.10.1/24");
        let _ = a.split(3).unwrap();
        assert_eq!(a.to_string(), "172.16.10.1/24");
    }

    #[test]
    fn test_each_host_of_small_networks() {
        let mut count = 0;
        ip("10.0.0.0/31").each(|_| count += 1);
        assert_eq!(count, 2);

        let mut hosts = Vec::new();
        ip("10.0.0.9/32").each_host(|h| hosts.push(h.to_s()));
        assert_eq!(hosts, vec!["10.0.0.9"]);
    }

    #[test]
    fn test_classful() {
        for (addr, len) in [("10.1.1.1", 8), ("150.1.1.1", 16), ("200.1.1.1", 24)] {
            let c = IpAddress::parse_classful(addr).unwrap();
            assert_eq!(c.prefix().length(), len);
            assert_eq!(c.to_string(), format!("{}/{}", addr, len));
        }
        assert!(IpAddress::parse_classful("192.168.256.257").is_err());
    }

    #[test]
    fn test_numeric_constructor() {
        let a = IpAddress::from_u32(0xc0a8_0001, 16).unwrap();
        assert_eq!(a.to_string(), "192.168.0.1/16");
        assert!(IpAddress::from_u32(1, 40).is_err());
    }
}
