// Copyright 2025 LocaLLM Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The fixed set of offers listed at process start.
//!
//! The first ten entries double as templates for synthetic offers, so the
//! order of this list matters.

use crate::catalog::types::{Availability, Offer, OfferSpecs};

#[allow(clippy::too_many_arguments)]
fn specs(
    architecture: &str,
    cuda_cores: u32,
    tensor_cores: u32,
    rt_cores: Option<u32>,
    clocks: (&str, &str),
    memory: (&str, &str),
    power_consumption: &str,
    cuda_version: &str,
    performance: (&str, &str),
) -> OfferSpecs {
    OfferSpecs {
        architecture: architecture.to_string(),
        cuda_cores,
        tensor_cores,
        rt_cores,
        base_clock: clocks.0.to_string(),
        boost_clock: clocks.1.to_string(),
        memory_type: memory.0.to_string(),
        memory_bandwidth: memory.1.to_string(),
        power_consumption: power_consumption.to_string(),
        cuda_version: cuda_version.to_string(),
        fp32_performance: performance.0.to_string(),
        fp16_performance: performance.1.to_string(),
    }
}

fn rtx_5090() -> OfferSpecs {
    specs(
        "Blackwell",
        21760,
        672,
        Some(168),
        ("2.23 GHz", "2.52 GHz"),
        ("GDDR7", "1.8 TB/s"),
        "450W",
        "12.4",
        ("107.6 TFLOPS", "215.2 TFLOPS"),
    )
}

fn h100() -> OfferSpecs {
    specs(
        "Hopper",
        14592,
        456,
        None,
        ("1.06 GHz", "1.76 GHz"),
        ("HBM3", "3.35 TB/s"),
        "700W",
        "12.2",
        ("67 TFLOPS", "1979 TFLOPS"),
    )
}

fn a100(memory_type: &str, bandwidth: &str) -> OfferSpecs {
    specs(
        "Ampere",
        6912,
        432,
        None,
        ("1.06 GHz", "1.41 GHz"),
        (memory_type, bandwidth),
        "400W",
        "11.8",
        ("19.5 TFLOPS", "312 TFLOPS"),
    )
}

fn rtx_4090() -> OfferSpecs {
    specs(
        "Ada Lovelace",
        16384,
        512,
        Some(128),
        ("2.23 GHz", "2.52 GHz"),
        ("GDDR6X", "1.0 TB/s"),
        "450W",
        "12.0",
        ("82.6 TFLOPS", "82.6 TFLOPS"),
    )
}

fn rtx_3090() -> OfferSpecs {
    specs(
        "Ampere",
        10496,
        328,
        Some(82),
        ("1.40 GHz", "1.70 GHz"),
        ("GDDR6X", "936 GB/s"),
        "350W",
        "11.6",
        ("35.6 TFLOPS", "35.6 TFLOPS"),
    )
}

struct Listing<'a> {
    id: &'a str,
    model: &'a str,
    count: u32,
    vram: u32,
    tflops: f64,
    cpu: &'a str,
    storage: &'a str,
    location: &'a str,
    price: f64,
    reliability: f64,
    max_duration: &'a str,
    status: Availability,
}

impl Listing<'_> {
    fn with_specs(self, specs: OfferSpecs) -> Offer {
        Offer {
            id: self.id.to_string(),
            model: self.model.to_string(),
            count: self.count,
            vram: self.vram,
            tflops: self.tflops,
            cpu: self.cpu.to_string(),
            storage: self.storage.to_string(),
            location: self.location.to_string(),
            price: self.price,
            reliability: self.reliability,
            max_duration: self.max_duration.to_string(),
            status: self.status,
            specs,
        }
    }
}

/// Build the base catalog in listing order.
pub fn base_offers() -> Vec<Offer> {
    use Availability::{Available, Occupied};

    vec![
        // RTX 5090 instances
        Listing {
            id: "5090-1",
            model: "RTX 5090",
            count: 1,
            vram: 32,
            tflops: 107.6,
            cpu: "AMD EPYC 9654",
            storage: "1TB NVMe Gen5",
            location: "US-East (N. Virginia)",
            price: 0.303,
            reliability: 99.8,
            max_duration: "5 mon",
            status: Available,
        }
        .with_specs(rtx_5090()),
        Listing {
            id: "5090-2",
            model: "RTX 5090",
            count: 2,
            vram: 64,
            tflops: 215.2,
            cpu: "AMD EPYC 9654",
            storage: "2TB NVMe Gen5",
            location: "EU-West (Ireland)",
            price: 0.780,
            reliability: 99.4,
            max_duration: "2 mon 2d",
            status: Available,
        }
        .with_specs(rtx_5090()),
        Listing {
            id: "5090-4",
            model: "RTX 5090",
            count: 4,
            vram: 128,
            tflops: 430.4,
            cpu: "AMD Threadripper PRO 7995WX",
            storage: "4TB NVMe Gen5 RAID0",
            location: "US-West (Oregon)",
            price: 1.550,
            reliability: 99.9,
            max_duration: "1 mon",
            status: Available,
        }
        .with_specs(rtx_5090()),
        // H100 instances, tflops quoted at FP8 tensor throughput
        Listing {
            id: "h100-1",
            model: "H100 SXM5",
            count: 1,
            vram: 80,
            tflops: 3958.0,
            cpu: "Intel Xeon Max 9480",
            storage: "1TB NVMe",
            location: "EU-Central (Frankfurt)",
            price: 2.874,
            reliability: 99.9,
            max_duration: "16d",
            status: Available,
        }
        .with_specs(h100()),
        Listing {
            id: "h100-8",
            model: "H100 SXM5",
            count: 8,
            vram: 640,
            tflops: 31664.0,
            cpu: "2x AMD EPYC 9654",
            storage: "30TB NVMe Pool",
            location: "US-East (N. Virginia)",
            price: 22.500,
            reliability: 99.99,
            max_duration: "Unlimited",
            status: Occupied,
        }
        .with_specs(h100()),
        // A100 instances, tflops quoted at TF32
        Listing {
            id: "a100-4",
            model: "A100 80GB",
            count: 4,
            vram: 320,
            tflops: 1248.0,
            cpu: "AMD EPYC 7763",
            storage: "4TB NVMe",
            location: "US-West (Oregon)",
            price: 4.506,
            reliability: 99.3,
            max_duration: "1 mon 2d",
            status: Occupied,
        }
        .with_specs(a100("HBM2e", "2.0 TB/s")),
        Listing {
            id: "a100-8",
            model: "A100 40GB",
            count: 8,
            vram: 320,
            tflops: 2496.0,
            cpu: "2x Intel Xeon Platinum 8380",
            storage: "16TB NVMe",
            location: "Asia-Pacific (Tokyo)",
            price: 7.200,
            reliability: 99.5,
            max_duration: "Unlimited",
            status: Available,
        }
        .with_specs(a100("HBM2", "1.6 TB/s")),
        // RTX 4090 instances
        Listing {
            id: "4090-1",
            model: "RTX 4090",
            count: 1,
            vram: 24,
            tflops: 82.6,
            cpu: "Intel Core i9-13900K",
            storage: "2TB NVMe",
            location: "EU-North (Stockholm)",
            price: 0.450,
            reliability: 98.9,
            max_duration: "3 mon",
            status: Available,
        }
        .with_specs(rtx_4090()),
        Listing {
            id: "4090-8",
            model: "RTX 4090",
            count: 8,
            vram: 192,
            tflops: 660.8,
            cpu: "AMD Threadripper PRO 5995WX",
            storage: "8TB NVMe",
            location: "US-East (N. Virginia)",
            price: 3.202,
            reliability: 99.3,
            max_duration: "2 mon",
            status: Available,
        }
        .with_specs(rtx_4090()),
        // RTX 3090 instances
        Listing {
            id: "3090-1",
            model: "RTX 3090",
            count: 1,
            vram: 24,
            tflops: 35.6,
            cpu: "AMD Ryzen 9 5950X",
            storage: "1TB SSD",
            location: "South America (São Paulo)",
            price: 0.220,
            reliability: 97.5,
            max_duration: "1 mon",
            status: Available,
        }
        .with_specs(rtx_3090()),
        Listing {
            id: "3090-4",
            model: "RTX 3090",
            count: 4,
            vram: 96,
            tflops: 142.4,
            cpu: "AMD Threadripper 3970X",
            storage: "4TB NVMe",
            location: "Asia-Pacific (Singapore)",
            price: 0.850,
            reliability: 98.2,
            max_duration: "6 mon",
            status: Available,
        }
        .with_specs(rtx_3090()),
        Listing {
            id: "l40s-1",
            model: "L40S",
            count: 1,
            vram: 48,
            tflops: 91.6,
            cpu: "Intel Xeon Gold 6430",
            storage: "2TB NVMe",
            location: "US-Central (Iowa)",
            price: 1.100,
            reliability: 99.8,
            max_duration: "1 yr",
            status: Available,
        }
        .with_specs(specs(
            "Ada Lovelace",
            18176,
            568,
            Some(142),
            ("1.11 GHz", "2.52 GHz"),
            ("GDDR6", "864 GB/s"),
            "350W",
            "12.2",
            ("91.6 TFLOPS", "183 TFLOPS"),
        )),
        // AMD: tensor cores are compute units, no CUDA cores
        Listing {
            id: "mi300x-1",
            model: "MI300X",
            count: 1,
            vram: 192,
            tflops: 1300.0,
            cpu: "AMD EPYC 9654",
            storage: "4TB NVMe",
            location: "US-East (N. Virginia)",
            price: 3.500,
            reliability: 99.1,
            max_duration: "3 mon",
            status: Available,
        }
        .with_specs(specs(
            "CDNA 3",
            0,
            304,
            None,
            ("1.1 GHz", "2.1 GHz"),
            ("HBM3", "5.3 TB/s"),
            "750W",
            "ROCm 6.0",
            ("163 TFLOPS", "1300 TFLOPS"),
        )),
        Listing {
            id: "5070ti-1",
            model: "RTX 5070 Ti",
            count: 1,
            vram: 16,
            tflops: 45.8,
            cpu: "Intel Core i7-14700K",
            storage: "512GB NVMe",
            location: "Asia-Pacific (Sydney)",
            price: 0.117,
            reliability: 97.9,
            max_duration: "62 mon",
            status: Available,
        }
        .with_specs(specs(
            "Blackwell",
            7680,
            240,
            Some(60),
            ("2.1 GHz", "2.6 GHz"),
            ("GDDR7", "800 GB/s"),
            "250W",
            "12.4",
            ("45.8 TFLOPS", "91.6 TFLOPS"),
        )),
        Listing {
            id: "a6000-2",
            model: "RTX A6000",
            count: 2,
            vram: 96,
            tflops: 77.4,
            cpu: "AMD EPYC 7543",
            storage: "2TB NVMe",
            location: "EU-West (Ireland)",
            price: 0.800,
            reliability: 99.6,
            max_duration: "Unlimited",
            status: Available,
        }
        .with_specs(specs(
            "Ampere",
            10752,
            336,
            Some(84),
            ("1.41 GHz", "1.80 GHz"),
            ("GDDR6", "768 GB/s"),
            "300W",
            "11.6",
            ("38.7 TFLOPS", "38.7 TFLOPS"),
        )),
        // 32GB x 4, tflops quoted at FP32
        Listing {
            id: "v100-4",
            model: "Tesla V100",
            count: 4,
            vram: 128,
            tflops: 56.0,
            cpu: "Intel Xeon Gold 6148",
            storage: "1TB SSD",
            location: "US-East (N. Virginia)",
            price: 1.200,
            reliability: 98.5,
            max_duration: "1 yr",
            status: Available,
        }
        .with_specs(specs(
            "Volta",
            5120,
            640,
            None,
            ("1.23 GHz", "1.38 GHz"),
            ("HBM2", "900 GB/s"),
            "250W",
            "11.0",
            ("14 TFLOPS", "28 TFLOPS"),
        )),
    ]
}
